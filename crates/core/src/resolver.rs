// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::registry::OfficerRegistry;
use emb_inspect_domain::{District, InspectionState, Law, Officer, Role};

/// Resolves the unique officer who owns a target workflow state.
///
/// Scoping depends on the owning role:
///
/// - Legal Unit and Division Chief states match any active officer of
///   that role.
/// - Section and Unit states try, in order: exact law section in the
///   inspection's district; combined section in the district; exact law
///   section anywhere; combined section anywhere. Unit states resolve
///   only for laws with a Unit stage.
/// - Monitoring states require a section covering the law **and** an
///   exact district match; there is no district fallback. An
///   exact-section officer in the district still wins over a
///   combined-section officer in the district.
///
/// # Errors
///
/// Returns `CoreError::NoAssigneeFound` when no officer matches. The
/// caller rejects the transition without changing state.
pub fn resolve_assignee(
    registry: &OfficerRegistry,
    target_state: InspectionState,
    law: Law,
    district: Option<&District>,
) -> Result<Officer, CoreError> {
    let not_found = || CoreError::NoAssigneeFound { target_state };

    let Some(role) = target_state.owning_role() else {
        return Err(not_found());
    };

    match role {
        Role::LegalUnit | Role::DivisionChief => registry
            .with_role(role)
            .next()
            .cloned()
            .ok_or_else(not_found),
        Role::SectionChief => {
            resolve_scoped(registry, Role::SectionChief, law, district).ok_or_else(not_found)
        }
        Role::UnitHead => {
            if !law.has_unit_head() {
                return Err(not_found());
            }
            resolve_scoped(registry, Role::UnitHead, law, district).ok_or_else(not_found)
        }
        Role::MonitoringPersonnel => {
            let district: &District = district.ok_or_else(not_found)?;
            let in_district = |o: &&Officer| o.district.as_ref() == Some(district);
            registry
                .with_role(Role::MonitoringPersonnel)
                .filter(in_district)
                .find(|o| o.law_section.is_some_and(|s| s.is_exact(law)))
                .or_else(|| {
                    registry
                        .with_role(Role::MonitoringPersonnel)
                        .filter(in_district)
                        .find(|o| o.law_section.is_some_and(|s| s.covers(law)))
                })
                .cloned()
                .ok_or_else(not_found)
        }
        Role::Admin => Err(not_found()),
    }
}

/// Four-step fallback for Section Chief and Unit Head resolution.
fn resolve_scoped(
    registry: &OfficerRegistry,
    role: Role,
    law: Law,
    district: Option<&District>,
) -> Option<Officer> {
    let exact = |o: &&Officer| o.law_section.is_some_and(|s| s.is_exact(law));
    let covers = |o: &&Officer| o.law_section.is_some_and(|s| s.covers(law));

    if let Some(district) = district {
        let in_district = |o: &&Officer| o.district.as_ref() == Some(district);
        if let Some(officer) = registry.with_role(role).filter(in_district).find(exact) {
            return Some(officer.clone());
        }
        if let Some(officer) = registry.with_role(role).filter(in_district).find(covers) {
            return Some(officer.clone());
        }
    }

    registry
        .with_role(role)
        .find(exact)
        .or_else(|| registry.with_role(role).find(covers))
        .cloned()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::officer::{Officer, Role};

/// Validates an officer's field-level constraints.
///
/// - The email must be non-empty and contain `@`.
/// - The name must be non-empty.
/// - Section Chief / Unit Head / Monitoring Personnel require a law
///   section; Admin / Legal Unit / Division Chief must not carry one.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_officer_fields(officer: &Officer) -> Result<(), DomainError> {
    let email: &str = officer.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::InvalidEmail(officer.email.clone()));
    }
    if officer.name.trim().is_empty() {
        return Err(DomainError::InvalidName(officer.name.clone()));
    }

    if officer.role.requires_law_section() {
        if officer.law_section.is_none() {
            return Err(DomainError::MissingLawSection {
                role: officer.role.to_string(),
            });
        }
    } else if officer.law_section.is_some() {
        return Err(DomainError::UnexpectedLawSection {
            role: officer.role.to_string(),
        });
    }

    Ok(())
}

/// Validates the role-slot cardinality invariants for activating (or
/// re-scoping) `candidate` against the other currently active officers.
///
/// Slots:
/// - at most one active Division Chief;
/// - at most one active Section Chief per law section value;
/// - at most one active Unit Head per law section value;
/// - at most one active Monitoring Personnel per (law section, district).
///
/// Admin and Legal Unit have no cardinality constraint. The candidate
/// itself (matched by id) is skipped so re-activation is idempotent.
///
/// # Errors
///
/// Returns `DomainError::RoleSlotOccupied` naming the current holder.
pub fn validate_role_slot(candidate: &Officer, active: &[Officer]) -> Result<(), DomainError> {
    let conflicts = |other: &&Officer| -> bool {
        if !other.active || other.role != candidate.role {
            return false;
        }
        if other.officer_id.is_some() && other.officer_id == candidate.officer_id {
            return false;
        }
        match candidate.role {
            Role::Admin | Role::LegalUnit => false,
            Role::DivisionChief => true,
            Role::SectionChief | Role::UnitHead => other.law_section == candidate.law_section,
            Role::MonitoringPersonnel => {
                other.law_section == candidate.law_section && other.district == candidate.district
            }
        }
    };

    if let Some(holder) = active.iter().find(conflicts) {
        return Err(DomainError::RoleSlotOccupied {
            role: candidate.role.to_string(),
            law_section: candidate.law_section.map(|s| s.to_string()),
            district: candidate.district.as_ref().map(ToString::to_string),
            held_by: holder.email.clone(),
        });
    }

    Ok(())
}

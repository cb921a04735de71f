// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::registry::OfficerRegistry;
use crate::resolver::resolve_assignee;
use crate::tests::helpers::{district, officer, registry, roster};
use emb_inspect_domain::{District, InspectionState, Law, LawSection, Officer, Role};

#[test]
fn test_registry_filters_inactive_officers() {
    let mut inactive: Officer = officer(1, Role::DivisionChief, None, None);
    inactive.active = false;
    let reg: OfficerRegistry = OfficerRegistry::new(vec![
        inactive,
        officer(2, Role::LegalUnit, None, None),
    ]);
    assert_eq!(reg.officers().len(), 1);
    assert!(reg.by_id(1).is_none());
    assert!(reg.by_id(2).is_some());
}

#[test]
fn test_exact_section_in_district_beats_combined() {
    let reg: OfficerRegistry = registry();
    let resolved: Officer = resolve_assignee(
        &reg,
        InspectionState::SectionAssigned,
        Law::Eia,
        Some(&district()),
    )
    .unwrap();
    assert_eq!(resolved.officer_id, Some(2));
}

#[test]
fn test_combined_section_resolves_when_no_exact_match() {
    let reg: OfficerRegistry = registry();
    // No exact Air section chief in the roster; combined covers Air.
    let resolved: Officer = resolve_assignee(
        &reg,
        InspectionState::SectionAssigned,
        Law::Air,
        Some(&district()),
    )
    .unwrap();
    assert_eq!(resolved.officer_id, Some(3));
}

#[test]
fn test_section_resolves_without_inspection_district() {
    let reg: OfficerRegistry = registry();
    let resolved: Officer =
        resolve_assignee(&reg, InspectionState::SectionAssigned, Law::Eia, None).unwrap();
    assert_eq!(resolved.officer_id, Some(2));
}

#[test]
fn test_section_district_mismatch_falls_back_to_any() {
    let reg: OfficerRegistry = registry();
    let other: District = District::new("Pangasinan - 4th District");
    // Officer 2 covers a different district; the anywhere fallback
    // still prefers the exact section over the combined one.
    let resolved: Officer =
        resolve_assignee(&reg, InspectionState::SectionAssigned, Law::Eia, Some(&other)).unwrap();
    assert_eq!(resolved.officer_id, Some(2));
}

#[test]
fn test_unit_state_never_resolves_for_law_without_unit() {
    let reg: OfficerRegistry = registry();
    let err = resolve_assignee(
        &reg,
        InspectionState::UnitAssigned,
        Law::Toxic,
        Some(&district()),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::NoAssigneeFound { .. }));
}

#[test]
fn test_monitoring_requires_district() {
    let reg: OfficerRegistry = registry();
    let err =
        resolve_assignee(&reg, InspectionState::MonitoringAssigned, Law::Eia, None).unwrap_err();
    assert!(matches!(err, CoreError::NoAssigneeFound { .. }));
}

#[test]
fn test_monitoring_has_no_district_fallback() {
    let reg: OfficerRegistry = registry();
    let other: District = District::new("La Union - 2nd District");
    // Monitoring officer 6 covers Eia but only in the first district.
    let err = resolve_assignee(
        &reg,
        InspectionState::MonitoringAssigned,
        Law::Eia,
        Some(&other),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::NoAssigneeFound { .. }));
}

#[test]
fn test_monitoring_combined_section_covers_in_district() {
    let mut officers: Vec<Officer> = roster();
    officers.retain(|o| o.officer_id != Some(6));
    officers.push(officer(
        16,
        Role::MonitoringPersonnel,
        Some(LawSection::EiaAirWater),
        Some(district()),
    ));
    let reg: OfficerRegistry = OfficerRegistry::new(officers);
    let resolved: Officer = resolve_assignee(
        &reg,
        InspectionState::MonitoringAssigned,
        Law::Eia,
        Some(&district()),
    )
    .unwrap();
    assert_eq!(resolved.officer_id, Some(16));
}

#[test]
fn test_legal_unit_resolves_regardless_of_scoping() {
    let reg: OfficerRegistry = registry();
    let resolved: Officer = resolve_assignee(
        &reg,
        InspectionState::LegalReviewNonCompliant,
        Law::Toxic,
        None,
    )
    .unwrap();
    assert_eq!(resolved.officer_id, Some(8));
}

#[test]
fn test_terminal_state_has_no_assignee() {
    let reg: OfficerRegistry = registry();
    let err = resolve_assignee(
        &reg,
        InspectionState::ClosedCompliant,
        Law::Eia,
        Some(&district()),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::NoAssigneeFound { .. }));
}

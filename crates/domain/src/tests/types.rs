// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ComplianceDecision, DistrictTable, DomainError, InspectionAction, InspectionCode,
    InspectionState, Law, LawSection, Role, SimplifiedStatus,
};
use std::str::FromStr;

#[test]
fn test_law_codes_round_trip() {
    for law in Law::ALL {
        assert_eq!(Law::parse(law.code()).unwrap(), law);
    }
}

#[test]
fn test_law_unknown_code_rejected() {
    let err: DomainError = Law::parse("RA-0000").unwrap_err();
    assert_eq!(err, DomainError::InvalidLaw(String::from("RA-0000")));
}

#[test]
fn test_unit_head_laws() {
    assert!(Law::Eia.has_unit_head());
    assert!(Law::Air.has_unit_head());
    assert!(Law::Water.has_unit_head());
    assert!(!Law::Toxic.has_unit_head());
    assert!(!Law::SolidWaste.has_unit_head());
}

#[test]
fn test_law_section_combined_marker_round_trip() {
    let section: LawSection = LawSection::parse("PD-1586,RA-8749,RA-9275").unwrap();
    assert_eq!(section, LawSection::EiaAirWater);
    assert_eq!(section.as_str(), "PD-1586,RA-8749,RA-9275");
}

#[test]
fn test_combined_section_covers_three_laws_exactly() {
    let combined: LawSection = LawSection::EiaAirWater;
    assert!(combined.covers(Law::Eia));
    assert!(combined.covers(Law::Air));
    assert!(combined.covers(Law::Water));
    assert!(!combined.covers(Law::Toxic));
    assert!(!combined.covers(Law::SolidWaste));
    // Combined coverage is never exact
    assert!(!combined.is_exact(Law::Eia));
}

#[test]
fn test_single_section_exact_match() {
    let section: LawSection = LawSection::Single(Law::Air);
    assert!(section.is_exact(Law::Air));
    assert!(section.covers(Law::Air));
    assert!(!section.covers(Law::Water));
}

#[test]
fn test_role_law_section_requirements() {
    assert!(Role::SectionChief.requires_law_section());
    assert!(Role::UnitHead.requires_law_section());
    assert!(Role::MonitoringPersonnel.requires_law_section());
    assert!(!Role::Admin.requires_law_section());
    assert!(!Role::LegalUnit.requires_law_section());
    assert!(!Role::DivisionChief.requires_law_section());
}

#[test]
fn test_district_capability_roles() {
    assert!(Role::Admin.can_assign_district());
    assert!(Role::SectionChief.can_assign_district());
    assert!(Role::UnitHead.can_assign_district());
    assert!(!Role::DivisionChief.can_assign_district());
    assert!(!Role::MonitoringPersonnel.can_assign_district());
}

#[test]
fn test_state_string_round_trip() {
    let states: [InspectionState; 21] = [
        InspectionState::Created,
        InspectionState::LegalReview,
        InspectionState::DivisionCreated,
        InspectionState::SectionAssigned,
        InspectionState::SectionInProgress,
        InspectionState::SectionCompleted,
        InspectionState::UnitAssigned,
        InspectionState::UnitInProgress,
        InspectionState::UnitCompleted,
        InspectionState::MonitoringAssigned,
        InspectionState::MonitoringInProgress,
        InspectionState::MonitoringCompletedCompliant,
        InspectionState::MonitoringCompletedNonCompliant,
        InspectionState::UnitReviewed,
        InspectionState::SectionReviewed,
        InspectionState::DivisionReviewed,
        InspectionState::LegalReviewNonCompliant,
        InspectionState::NovSent,
        InspectionState::NooSent,
        InspectionState::ClosedCompliant,
        InspectionState::ClosedNonCompliant,
    ];
    for state in states {
        assert_eq!(InspectionState::from_str(state.as_str()).unwrap(), state);
    }
}

#[test]
fn test_terminal_states_have_no_owner() {
    assert!(InspectionState::ClosedCompliant.is_terminal());
    assert!(InspectionState::ClosedNonCompliant.is_terminal());
    assert_eq!(InspectionState::ClosedCompliant.owning_role(), None);
    assert_eq!(InspectionState::Created.owning_role(), None);
    assert!(!InspectionState::NovSent.is_terminal());
}

#[test]
fn test_state_ownership() {
    assert_eq!(
        InspectionState::SectionAssigned.owning_role(),
        Some(Role::SectionChief)
    );
    assert_eq!(
        InspectionState::UnitReviewed.owning_role(),
        Some(Role::UnitHead)
    );
    assert_eq!(
        InspectionState::MonitoringInProgress.owning_role(),
        Some(Role::MonitoringPersonnel)
    );
    assert_eq!(
        InspectionState::LegalReviewNonCompliant.owning_role(),
        Some(Role::LegalUnit)
    );
    assert_eq!(
        InspectionState::DivisionReviewed.owning_role(),
        Some(Role::DivisionChief)
    );
}

#[test]
fn test_simplified_status_grouping() {
    assert_eq!(
        InspectionState::SectionInProgress.simplified_status(),
        SimplifiedStatus::InProgress
    );
    assert_eq!(
        InspectionState::DivisionReviewed.simplified_status(),
        SimplifiedStatus::ForReview
    );
    assert_eq!(
        InspectionState::NovSent.simplified_status(),
        SimplifiedStatus::Legal
    );
    assert_eq!(
        InspectionState::ClosedNonCompliant.simplified_status(),
        SimplifiedStatus::Closed
    );
}

#[test]
fn test_action_verbs_round_trip() {
    let actions: [InspectionAction; 9] = [
        InspectionAction::AssignToMe,
        InspectionAction::Start,
        InspectionAction::Complete,
        InspectionAction::Forward,
        InspectionAction::Review,
        InspectionAction::ForwardToLegal,
        InspectionAction::SendNov,
        InspectionAction::SendNoo,
        InspectionAction::Close,
    ];
    for action in actions {
        assert_eq!(InspectionAction::from_str(action.verb()).unwrap(), action);
    }
}

#[test]
fn test_compliance_decision_round_trip() {
    assert_eq!(
        ComplianceDecision::from_str("COMPLIANT").unwrap(),
        ComplianceDecision::Compliant
    );
    assert_eq!(
        ComplianceDecision::from_str("NON_COMPLIANT").unwrap(),
        ComplianceDecision::NonCompliant
    );
    assert!(ComplianceDecision::from_str("MAYBE").is_err());
}

#[test]
fn test_inspection_code_format() {
    let code: InspectionCode = InspectionCode::format(Law::Eia, 2024, 1);
    assert_eq!(code.value(), "EIA-2024-0001");

    let code: InspectionCode = InspectionCode::format(Law::SolidWaste, 2026, 412);
    assert_eq!(code.value(), "WASTE-2026-0412");
}

#[test]
fn test_inspection_code_parse_accepts_all_prefixes() {
    for prefix in ["EIA", "TOX", "AIR", "WATER", "WASTE"] {
        let value: String = format!("{prefix}-2024-0001");
        assert!(InspectionCode::parse(&value).is_ok(), "{value}");
    }
}

#[test]
fn test_inspection_code_parse_rejects_malformed() {
    for bad in [
        "EIA-2024-001",
        "EIA-24-0001",
        "GAS-2024-0001",
        "EIA-2024-0001-X",
        "EIA-2024",
        "eia-2024-0001",
        "EIA-2O24-0001",
    ] {
        assert!(InspectionCode::parse(bad).is_err(), "{bad}");
    }
}

#[test]
fn test_district_lookup_known_city() {
    let table: DistrictTable = DistrictTable::builtin();
    let district = table.lookup("Ilocos Norte", "Laoag City").unwrap();
    assert_eq!(district.value(), "Ilocos Norte - 1st District");
}

#[test]
fn test_district_lookup_is_case_insensitive() {
    let table: DistrictTable = DistrictTable::builtin();
    let district = table.lookup("ILOCOS NORTE", " laoag city ").unwrap();
    assert_eq!(district.value(), "Ilocos Norte - 1st District");
}

#[test]
fn test_district_lookup_unknown_pair_is_none() {
    let table: DistrictTable = DistrictTable::builtin();
    assert!(table.lookup("Metro Manila", "Quezon City").is_none());
}

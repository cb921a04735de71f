// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::registry::OfficerRegistry;
use emb_inspect_domain::{
    District, Inspection, InspectionForm, InspectionState, Law, LawSection, Officer, Role,
};
use time::{Date, OffsetDateTime, macros::date, macros::datetime};

pub fn now() -> OffsetDateTime {
    datetime!(2024-03-15 08:00 UTC)
}

pub fn today() -> Date {
    date!(2024 - 03 - 15)
}

pub fn district() -> District {
    District::new("Ilocos Norte - 1st District")
}

pub fn officer(
    id: i64,
    role: Role,
    law_section: Option<LawSection>,
    district: Option<District>,
) -> Officer {
    Officer::with_id(
        id,
        format!("officer{id}@emb.gov.ph"),
        format!("Officer {id}"),
        role,
        law_section,
        district,
        true,
    )
}

/// A full roster covering every role slot the workflow can resolve to.
pub fn roster() -> Vec<Officer> {
    vec![
        officer(1, Role::DivisionChief, None, None),
        officer(
            2,
            Role::SectionChief,
            Some(LawSection::Single(Law::Eia)),
            Some(district()),
        ),
        officer(3, Role::SectionChief, Some(LawSection::EiaAirWater), None),
        officer(
            4,
            Role::SectionChief,
            Some(LawSection::Single(Law::Toxic)),
            None,
        ),
        officer(5, Role::UnitHead, Some(LawSection::Single(Law::Eia)), None),
        officer(
            6,
            Role::MonitoringPersonnel,
            Some(LawSection::Single(Law::Eia)),
            Some(district()),
        ),
        officer(
            7,
            Role::MonitoringPersonnel,
            Some(LawSection::Single(Law::Toxic)),
            Some(district()),
        ),
        officer(8, Role::LegalUnit, None, None),
        officer(9, Role::Admin, None, None),
    ]
}

pub fn registry() -> OfficerRegistry {
    OfficerRegistry::new(roster())
}

pub fn inspection(law: Law, state: InspectionState, assignee: Option<i64>) -> Inspection {
    Inspection {
        inspection_id: Some(10),
        code: None,
        establishment_ids: vec![100, 101],
        law,
        district: Some(district()),
        current_state: state,
        current_assignee: assignee,
        created_by: 1,
        form: InspectionForm::new(None, None),
        created_at: now(),
        updated_at: now(),
    }
}

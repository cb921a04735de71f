// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use emb_inspect_domain::{District, Establishment, Law, LawSection, Officer, Role};
use emb_inspect_persistence::SqlitePersistence;
use time::{Date, OffsetDateTime, macros::date, macros::datetime};

use crate::handlers;
use crate::request_response::{ActionPayload, CreateInspectionRequest, InspectionResponse};

pub const CHIEF: i64 = 1;
pub const EIA_SECTION: i64 = 2;
pub const TOX_SECTION: i64 = 4;
pub const EIA_UNIT: i64 = 5;
pub const EIA_MONITOR: i64 = 6;
pub const TOX_MONITOR: i64 = 7;
pub const LEGAL: i64 = 8;
pub const ADMIN: i64 = 9;

pub fn now() -> OffsetDateTime {
    datetime!(2024-03-15 08:00 UTC)
}

pub fn today() -> Date {
    date!(2024 - 03 - 15)
}

pub fn district() -> District {
    District::new("Ilocos Norte - 1st District")
}

fn officer(email: &str, role: Role, section: Option<LawSection>, d: Option<District>) -> Officer {
    Officer::new(
        email.to_string(),
        format!("Officer {email}"),
        role,
        section,
        d,
        true,
    )
}

fn establishment(name: &str) -> Establishment {
    Establishment {
        establishment_id: None,
        name: name.to_string(),
        province: "Ilocos Norte".to_string(),
        city: "Laoag City".to_string(),
        contact_email: Some(format!("{}@factory.example", name.to_lowercase())),
    }
}

/// A database seeded with a full roster (officer ids 1..=9 in roster
/// order) and two establishments (ids 1 and 2).
pub fn seeded() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    let roster: Vec<Officer> = vec![
        officer("chief@emb.gov.ph", Role::DivisionChief, None, None),
        officer(
            "eia.section@emb.gov.ph",
            Role::SectionChief,
            Some(LawSection::Single(Law::Eia)),
            Some(district()),
        ),
        officer(
            "combined.section@emb.gov.ph",
            Role::SectionChief,
            Some(LawSection::EiaAirWater),
            None,
        ),
        officer(
            "tox.section@emb.gov.ph",
            Role::SectionChief,
            Some(LawSection::Single(Law::Toxic)),
            None,
        ),
        officer(
            "eia.unit@emb.gov.ph",
            Role::UnitHead,
            Some(LawSection::Single(Law::Eia)),
            None,
        ),
        officer(
            "eia.monitor@emb.gov.ph",
            Role::MonitoringPersonnel,
            Some(LawSection::Single(Law::Eia)),
            Some(district()),
        ),
        officer(
            "tox.monitor@emb.gov.ph",
            Role::MonitoringPersonnel,
            Some(LawSection::Single(Law::Toxic)),
            Some(district()),
        ),
        officer("legal@emb.gov.ph", Role::LegalUnit, None, None),
        officer("admin@emb.gov.ph", Role::Admin, None, None),
    ];
    for member in &roster {
        persistence.create_officer(member).unwrap();
    }

    persistence
        .create_establishment(&establishment("Northwind"))
        .unwrap();
    persistence
        .create_establishment(&establishment("Harborline"))
        .unwrap();

    persistence
}

/// Creates an inspection through the API as the Division Chief.
pub fn created(persistence: &mut SqlitePersistence, law: &str) -> InspectionResponse {
    handlers::create_inspection(
        persistence,
        CreateInspectionRequest {
            establishments: vec![1, 2],
            law: law.to_string(),
            scheduled_at: Some(date!(2024 - 04 - 01)),
            inspection_notes: None,
        },
        CHIEF,
        now(),
    )
    .unwrap()
}

/// Performs one action through the API, panicking on error.
pub fn acted(
    persistence: &mut SqlitePersistence,
    inspection_id: i64,
    verb: &str,
    payload: ActionPayload,
    actor_id: i64,
) -> InspectionResponse {
    let (response, _) = handlers::perform_inspection_action(
        persistence,
        inspection_id,
        verb,
        payload,
        actor_id,
        today(),
        now(),
    )
    .unwrap();
    response
}

/// The monitoring completion payload for a given decision.
pub fn completion(decision: &str, violations: Option<&str>) -> ActionPayload {
    ActionPayload {
        decision: Some(decision.to_string()),
        violations_found: violations.map(ToString::to_string),
        ..ActionPayload::default()
    }
}

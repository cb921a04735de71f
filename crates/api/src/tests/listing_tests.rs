// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::handlers;
use crate::request_response::{ActionPayload, ListInspectionsRequest};
use crate::tests::helpers::{
    ADMIN, CHIEF, EIA_SECTION, EIA_UNIT, LEGAL, TOX_MONITOR, TOX_SECTION, acted, completion,
    created, seeded,
};

fn tab(name: &str) -> ListInspectionsRequest {
    ListInspectionsRequest {
        tab: Some(name.to_string()),
        ..ListInspectionsRequest::default()
    }
}

#[test]
fn test_section_chief_received_tab() {
    let mut persistence = seeded();
    let eia = created(&mut persistence, "PD-1586");
    created(&mut persistence, "RA-6969");

    let rows =
        handlers::list_inspections(&mut persistence, tab("received"), EIA_SECTION).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].inspection_id, eia.inspection_id);

    // Starting work moves it to my_inspections.
    acted(
        &mut persistence,
        eia.inspection_id,
        "start",
        ActionPayload::default(),
        EIA_SECTION,
    );
    let received =
        handlers::list_inspections(&mut persistence, tab("received"), EIA_SECTION).unwrap();
    assert!(received.is_empty());
    let mine =
        handlers::list_inspections(&mut persistence, tab("my_inspections"), EIA_SECTION).unwrap();
    assert_eq!(mine.len(), 1);
}

#[test]
fn test_section_chief_forwarded_tab_scopes_to_own_laws() {
    let mut persistence = seeded();
    let eia = created(&mut persistence, "PD-1586");
    let tox = created(&mut persistence, "RA-6969");

    acted(
        &mut persistence,
        eia.inspection_id,
        "forward",
        ActionPayload::default(),
        EIA_SECTION,
    );
    acted(
        &mut persistence,
        tox.inspection_id,
        "forward",
        ActionPayload::default(),
        TOX_SECTION,
    );

    let forwarded =
        handlers::list_inspections(&mut persistence, tab("forwarded"), EIA_SECTION).unwrap();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].inspection_id, eia.inspection_id);
    assert_eq!(forwarded[0].state, "UNIT_ASSIGNED");
}

#[test]
fn test_monitoring_queue_is_the_default() {
    let mut persistence = seeded();
    let tox = created(&mut persistence, "RA-6969");
    acted(
        &mut persistence,
        tox.inspection_id,
        "forward",
        ActionPayload::default(),
        TOX_SECTION,
    );

    let queue = handlers::list_inspections(
        &mut persistence,
        ListInspectionsRequest::default(),
        TOX_MONITOR,
    )
    .unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].current_assignee, Some(TOX_MONITOR));
}

#[test]
fn test_legal_queue_is_the_default() {
    let mut persistence = seeded();
    let tox = created(&mut persistence, "RA-6969");
    let id = tox.inspection_id;

    acted(&mut persistence, id, "forward", ActionPayload::default(), TOX_SECTION);
    acted(&mut persistence, id, "start", ActionPayload::default(), TOX_MONITOR);
    acted(
        &mut persistence,
        id,
        "complete",
        completion("NON_COMPLIANT", Some("Effluent discharge without permit")),
        TOX_MONITOR,
    );
    acted(&mut persistence, id, "review", ActionPayload::default(), TOX_SECTION);

    let before =
        handlers::list_inspections(&mut persistence, ListInspectionsRequest::default(), LEGAL)
            .unwrap();
    assert!(before.is_empty());

    acted(&mut persistence, id, "forward_to_legal", ActionPayload::default(), CHIEF);
    let after =
        handlers::list_inspections(&mut persistence, ListInspectionsRequest::default(), LEGAL)
            .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].state, "LEGAL_REVIEW_NON_COMPLIANT");
}

#[test]
fn test_division_chief_tracking_tab() {
    let mut persistence = seeded();
    created(&mut persistence, "PD-1586");
    created(&mut persistence, "RA-6969");

    let tracked =
        handlers::list_inspections(&mut persistence, tab("tracking"), CHIEF).unwrap();
    assert_eq!(tracked.len(), 2);
    // Newest first.
    assert!(tracked[0].inspection_id > tracked[1].inspection_id);
}

#[test]
fn test_status_and_flag_filters() {
    let mut persistence = seeded();
    let eia = created(&mut persistence, "PD-1586");
    created(&mut persistence, "RA-6969");
    acted(
        &mut persistence,
        eia.inspection_id,
        "forward",
        ActionPayload::default(),
        EIA_SECTION,
    );

    let admin_all = handlers::list_inspections(
        &mut persistence,
        ListInspectionsRequest::default(),
        ADMIN,
    )
    .unwrap();
    assert_eq!(admin_all.len(), 2);

    let unit_assigned = handlers::list_inspections(
        &mut persistence,
        ListInspectionsRequest {
            assigned_to_me: true,
            ..ListInspectionsRequest::default()
        },
        EIA_UNIT,
    )
    .unwrap();
    assert_eq!(unit_assigned.len(), 1);
    assert_eq!(unit_assigned[0].inspection_id, eia.inspection_id);

    let created_by_chief = handlers::list_inspections(
        &mut persistence,
        ListInspectionsRequest {
            created_by_me: true,
            status: Some("IN_PROGRESS".to_string()),
            ..ListInspectionsRequest::default()
        },
        CHIEF,
    )
    .unwrap();
    assert_eq!(created_by_chief.len(), 2);
}

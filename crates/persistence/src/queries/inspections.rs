// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection aggregate queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::{
    District, Inspection, InspectionCode, InspectionDocument, InspectionState, Law,
};
use emb_inspect_events::HistoryEntry;

use crate::data_models::{
    DocumentRow, FormRow, HistoryRow, InspectionRow, decode_timestamp, law_from_text,
};
use crate::diesel_schema::{
    inspection_documents, inspection_establishments, inspection_forms, inspection_history,
    inspections,
};
use crate::error::PersistenceError;

/// Filter for [`list_inspections`]. The empty filter lists everything.
///
/// The API layer builds these from the per-role tab semantics; the
/// query itself is policy-free.
#[derive(Debug, Clone, Default)]
pub struct InspectionListFilter {
    /// Restrict to these states. Empty means any state.
    pub states: Vec<InspectionState>,
    /// Restrict to inspections currently assigned to this officer.
    pub assignee: Option<i64>,
    /// Restrict to inspections created by this officer.
    pub created_by: Option<i64>,
    /// Restrict to one law.
    pub law: Option<Law>,
    /// Restrict to inspections covering this establishment.
    pub establishment_id: Option<i64>,
}

/// Loads a full inspection aggregate: head row, establishment links,
/// form, and documents.
///
/// # Errors
///
/// Returns `InspectionNotFound` when no row matches, or `CorruptRow`
/// when a stored value fails to decode.
pub fn load_inspection(
    conn: &mut SqliteConnection,
    inspection_id: i64,
) -> Result<Inspection, PersistenceError> {
    let head: InspectionRow = inspections::table
        .find(inspection_id)
        .select(InspectionRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::InspectionNotFound(inspection_id))?;
    assemble(conn, head)
}

/// Loads an inspection by its public code.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` when no
/// inspection carries the code.
pub fn find_by_code(
    conn: &mut SqliteConnection,
    code: &InspectionCode,
) -> Result<Option<Inspection>, PersistenceError> {
    let head: Option<InspectionRow> = inspections::table
        .filter(inspections::code.eq(code.value()))
        .select(InspectionRow::as_select())
        .first(conn)
        .optional()?;
    head.map(|head| assemble(conn, head)).transpose()
}

/// Lists inspections matching the filter, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_inspections(
    conn: &mut SqliteConnection,
    filter: &InspectionListFilter,
) -> Result<Vec<Inspection>, PersistenceError> {
    let mut query = inspections::table.into_boxed();

    if !filter.states.is_empty() {
        let states: Vec<&'static str> =
            filter.states.iter().map(InspectionState::as_str).collect();
        query = query.filter(inspections::current_state.eq_any(states));
    }
    if let Some(assignee) = filter.assignee {
        query = query.filter(inspections::current_assignee.eq(assignee));
    }
    if let Some(created_by) = filter.created_by {
        query = query.filter(inspections::created_by.eq(created_by));
    }
    if let Some(law) = filter.law {
        query = query.filter(inspections::law.eq(law.code()));
    }
    if let Some(establishment_id) = filter.establishment_id {
        let linked = inspection_establishments::table
            .filter(inspection_establishments::establishment_id.eq(establishment_id))
            .select(inspection_establishments::inspection_id);
        query = query.filter(inspections::inspection_id.eq_any(linked));
    }

    let heads: Vec<InspectionRow> = query
        .order(inspections::inspection_id.desc())
        .select(InspectionRow::as_select())
        .load(conn)?;

    heads.into_iter().map(|head| assemble(conn, head)).collect()
}

/// Full history of an inspection, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn history_for(
    conn: &mut SqliteConnection,
    inspection_id: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = inspection_history::table
        .filter(inspection_history::inspection_id.eq(inspection_id))
        .order(inspection_history::history_id.desc())
        .select(HistoryRow::as_select())
        .load(conn)?;
    rows.into_iter().map(HistoryRow::into_domain).collect()
}

fn assemble(
    conn: &mut SqliteConnection,
    head: InspectionRow,
) -> Result<Inspection, PersistenceError> {
    let inspection_id: i64 = head.inspection_id;

    let establishment_ids: Vec<i64> = inspection_establishments::table
        .filter(inspection_establishments::inspection_id.eq(inspection_id))
        .order(inspection_establishments::link_id.asc())
        .select(inspection_establishments::establishment_id)
        .load(conn)?;

    let documents: Vec<InspectionDocument> = inspection_documents::table
        .filter(inspection_documents::inspection_id.eq(inspection_id))
        .order(inspection_documents::document_id.asc())
        .select(DocumentRow::as_select())
        .load::<DocumentRow>(conn)?
        .into_iter()
        .map(DocumentRow::into_domain)
        .collect::<Result<_, _>>()?;

    let form_row: FormRow = inspection_forms::table
        .filter(inspection_forms::inspection_id.eq(inspection_id))
        .select(FormRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::CorruptRow(format!("Inspection {inspection_id} has no form row"))
        })?;

    Ok(Inspection {
        inspection_id: Some(inspection_id),
        code: Some(InspectionCode::parse(&head.code)?),
        establishment_ids,
        law: law_from_text(&head.law)?,
        district: head.district.as_deref().map(District::new),
        current_state: head.current_state.parse()?,
        current_assignee: head.current_assignee,
        created_by: head.created_by,
        form: form_row.into_domain(documents)?,
        created_at: decode_timestamp(&head.created_at)?,
        updated_at: decode_timestamp(&head.updated_at)?,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection mutations.
//!
//! Creation and transitions are multi-table writes and always run in a
//! single transaction: the aggregate head, the form, establishment
//! links, history entries, notifications, and obligations commit
//! together or not at all.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use emb_inspect::{ActionOutcome, CreationOutcome, TransitionStep};
use emb_inspect_domain::{Inspection, InspectionCode, InspectionDocument, InspectionForm,
    InspectionState};
use emb_inspect_events::HistoryEntry;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{encode_date, encode_timestamp};
use crate::diesel_schema::{
    inspection_documents, inspection_establishments, inspection_forms, inspection_history,
    inspections,
};
use crate::error::PersistenceError;
use crate::mutations::notifications::insert_notification;
use crate::mutations::obligations::upsert_obligation;
use crate::sqlite::get_last_insert_rowid;

/// Bounded retries for code allocation under concurrent creation.
const MAX_CODE_ATTEMPTS: u32 = 5;

/// Largest sequence the four-digit code segment can represent.
const MAX_SEQUENCE: u32 = 9999;

/// Persists a freshly created inspection: allocates its code, inserts
/// the aggregate head, the form, the establishment links, the creation
/// history entry, and the notifications.
///
/// # Errors
///
/// Returns `CodeAllocationExhausted` when every allocation attempt
/// collides, or a database error on any failed write.
pub fn persist_creation(
    conn: &mut SqliteConnection,
    outcome: &CreationOutcome,
) -> Result<(i64, InspectionCode), PersistenceError> {
    conn.transaction(|conn| {
        let inspection: &Inspection = &outcome.inspection;
        let year: i32 = inspection.created_at.year();
        let created_at: String = encode_timestamp(inspection.created_at)?;
        let updated_at: String = encode_timestamp(inspection.updated_at)?;

        let mut allocated: Option<(i64, InspectionCode)> = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let sequence: u32 = next_sequence(conn, inspection.law.code_prefix(), year)?;
            let code: InspectionCode = InspectionCode::format(inspection.law, year, sequence);

            let inserted = diesel::insert_into(inspections::table)
                .values((
                    inspections::code.eq(code.value()),
                    inspections::law.eq(inspection.law.code()),
                    inspections::district
                        .eq(inspection.district.as_ref().map(|d| d.value().to_string())),
                    inspections::current_state.eq(inspection.current_state.as_str()),
                    inspections::current_assignee.eq(inspection.current_assignee),
                    inspections::created_by.eq(inspection.created_by),
                    inspections::created_at.eq(&created_at),
                    inspections::updated_at.eq(&updated_at),
                ))
                .execute(conn);

            match inserted {
                Ok(_) => {
                    let id: i64 = get_last_insert_rowid(conn)?;
                    allocated = Some((id, code));
                    break;
                }
                Err(diesel::result::Error::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    _,
                )) => {
                    debug!(code = code.value(), "Code collision, retrying allocation");
                }
                Err(e) => return Err(PersistenceError::from(e)),
            }
        }
        let Some((inspection_id, code)) = allocated else {
            return Err(PersistenceError::CodeAllocationExhausted(format!(
                "{}-{year:04}",
                inspection.law.code_prefix()
            )));
        };

        for &establishment_id in &inspection.establishment_ids {
            diesel::insert_into(inspection_establishments::table)
                .values((
                    inspection_establishments::inspection_id.eq(inspection_id),
                    inspection_establishments::establishment_id.eq(establishment_id),
                ))
                .execute(conn)?;
        }

        insert_form(conn, inspection_id, &inspection.form)?;
        insert_history(conn, inspection_id, &outcome.history)?;
        for notification in &outcome.notifications {
            // The aggregate had no id when the engine built these.
            let mut notification = notification.clone();
            notification.related_inspection = Some(inspection_id);
            insert_notification(conn, &notification)?;
        }

        info!(inspection_id, code = code.value(), "Created inspection");
        Ok((inspection_id, code))
    })
}

/// Applies a committed action outcome: updates the aggregate head and
/// form, appends the history entries in step order, inserts the
/// notifications, and upserts any reinspection obligations.
///
/// # Errors
///
/// Returns `InspectionNotFound` when the aggregate does not exist, or a
/// database error on any failed write.
pub fn apply_transition(
    conn: &mut SqliteConnection,
    inspection_id: i64,
    outcome: &ActionOutcome,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let updated: usize = diesel::update(inspections::table.find(inspection_id))
            .set((
                inspections::current_state.eq(outcome.final_state.as_str()),
                inspections::current_assignee.eq(outcome.final_assignee),
                inspections::updated_at.eq(encode_timestamp(now)?),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::InspectionNotFound(inspection_id));
        }

        update_form(conn, inspection_id, &outcome.form)?;

        for step in &outcome.steps {
            let TransitionStep {
                history,
                notifications,
                ..
            } = step;
            insert_history(conn, inspection_id, history)?;
            for notification in notifications {
                insert_notification(conn, notification)?;
            }
        }

        for obligation in &outcome.obligations {
            upsert_obligation(conn, obligation)?;
        }

        info!(
            inspection_id,
            final_state = outcome.final_state.as_str(),
            steps = outcome.steps.len(),
            "Applied inspection transition"
        );
        Ok(())
    })
}

/// Attaches a document to an inspection.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_document(
    conn: &mut SqliteConnection,
    inspection_id: i64,
    document: &InspectionDocument,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(inspection_documents::table)
        .values((
            inspection_documents::inspection_id.eq(inspection_id),
            inspection_documents::file_ref.eq(&document.file_ref),
            inspection_documents::doc_type.eq(&document.doc_type),
            inspection_documents::uploaded_by.eq(document.uploaded_by),
            inspection_documents::uploaded_at.eq(encode_timestamp(document.uploaded_at)?),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Administrative out-of-band state override.
///
/// Bypasses the transition table entirely; the caller records why in
/// the history entry's remarks.
///
/// # Errors
///
/// Returns `InspectionNotFound` when the aggregate does not exist.
pub fn override_state(
    conn: &mut SqliteConnection,
    inspection_id: i64,
    new_state: InspectionState,
    assignee: Option<i64>,
    history: &HistoryEntry,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let updated: usize = diesel::update(inspections::table.find(inspection_id))
            .set((
                inspections::current_state.eq(new_state.as_str()),
                inspections::current_assignee.eq(assignee),
                inspections::updated_at.eq(encode_timestamp(now)?),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::InspectionNotFound(inspection_id));
        }
        insert_history(conn, inspection_id, history)?;
        info!(
            inspection_id,
            new_state = new_state.as_str(),
            "Overrode inspection state"
        );
        Ok(())
    })
}

/// Next free sequence for a (law prefix, year) pair.
///
/// Sequences are zero-padded to four digits, so the lexical maximum of
/// the stored codes is also the numeric maximum. Sequence 9999 is the
/// last one the code format can hold; allocation past it fails rather
/// than emitting a five-digit code.
pub(crate) fn next_sequence(
    conn: &mut SqliteConnection,
    prefix: &str,
    year: i32,
) -> Result<u32, PersistenceError> {
    let pattern: String = format!("{prefix}-{year:04}-%");
    let last: Option<String> = inspections::table
        .filter(inspections::code.like(&pattern))
        .select(inspections::code)
        .order(inspections::code.desc())
        .first::<String>(conn)
        .optional()?;

    let next: u32 = match last {
        Some(code) => code
            .rsplit('-')
            .next()
            .and_then(|seq| seq.parse::<u32>().ok())
            .map_or(1, |seq| seq + 1),
        None => 1,
    };
    if next > MAX_SEQUENCE {
        return Err(PersistenceError::CodeSpaceExhausted(format!(
            "{prefix}-{year:04}"
        )));
    }
    Ok(next)
}

fn insert_form(
    conn: &mut SqliteConnection,
    inspection_id: i64,
    form: &InspectionForm,
) -> Result<(), PersistenceError> {
    diesel::insert_into(inspection_forms::table)
        .values((
            inspection_forms::inspection_id.eq(inspection_id),
            inspection_forms::scheduled_at
                .eq(form.scheduled_at.map(encode_date).transpose()?),
            inspection_forms::inspection_notes.eq(&form.inspection_notes),
            inspection_forms::checklist.eq(&form.checklist),
            inspection_forms::findings_summary.eq(&form.findings_summary),
            inspection_forms::compliance_decision
                .eq(form.compliance_decision.map(|d| d.as_str())),
            inspection_forms::violations_found.eq(&form.violations_found),
            inspection_forms::compliance_plan.eq(&form.compliance_plan),
            inspection_forms::compliance_deadline
                .eq(form.compliance_deadline.map(encode_date).transpose()?),
        ))
        .execute(conn)?;
    Ok(())
}

fn update_form(
    conn: &mut SqliteConnection,
    inspection_id: i64,
    form: &InspectionForm,
) -> Result<(), PersistenceError> {
    diesel::update(
        inspection_forms::table.filter(inspection_forms::inspection_id.eq(inspection_id)),
    )
    .set((
        inspection_forms::scheduled_at.eq(form.scheduled_at.map(encode_date).transpose()?),
        inspection_forms::inspection_notes.eq(&form.inspection_notes),
        inspection_forms::checklist.eq(&form.checklist),
        inspection_forms::findings_summary.eq(&form.findings_summary),
        inspection_forms::compliance_decision.eq(form.compliance_decision.map(|d| d.as_str())),
        inspection_forms::violations_found.eq(&form.violations_found),
        inspection_forms::compliance_plan.eq(&form.compliance_plan),
        inspection_forms::compliance_deadline
            .eq(form.compliance_deadline.map(encode_date).transpose()?),
    ))
    .execute(conn)?;
    Ok(())
}

pub(crate) fn insert_history(
    conn: &mut SqliteConnection,
    inspection_id: i64,
    entry: &HistoryEntry,
) -> Result<(), PersistenceError> {
    diesel::insert_into(inspection_history::table)
        .values((
            inspection_history::inspection_id.eq(inspection_id),
            inspection_history::previous_state.eq(entry.previous_state.map(|s| s.as_str())),
            inspection_history::new_state.eq(entry.new_state.as_str()),
            inspection_history::actor_id.eq(entry.actor_id),
            inspection_history::actor_name.eq(&entry.actor_name),
            inspection_history::remarks.eq(&entry.remarks),
            inspection_history::occurred_at.eq(encode_timestamp(entry.timestamp)?),
        ))
        .execute(conn)?;
    Ok(())
}

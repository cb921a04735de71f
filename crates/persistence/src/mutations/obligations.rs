// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reinspection obligation mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::{ObligationStatus, ReinspectionObligation};
use tracing::debug;

use crate::data_models::encode_date;
use crate::diesel_schema::reinspection_obligations;
use crate::error::PersistenceError;

/// Upserts an obligation keyed on (establishment, inspection).
///
/// Re-closing an inspection overwrites the outcome and due date of the
/// existing obligation and resets it to pending with the reminder
/// cleared.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_obligation(
    conn: &mut SqliteConnection,
    obligation: &ReinspectionObligation,
) -> Result<(), PersistenceError> {
    let due_date: String = encode_date(obligation.due_date)?;

    let overwrite = (
        reinspection_obligations::outcome.eq(obligation.outcome.as_str()),
        reinspection_obligations::due_date.eq(&due_date),
        reinspection_obligations::status.eq(ObligationStatus::Pending.as_str()),
        reinspection_obligations::reminder_sent.eq(0),
    );

    // SQL `=` never matches a NULL inspection key, so the standalone
    // obligation row needs an explicit IS NULL filter.
    let updated: usize = match obligation.inspection_id {
        Some(inspection_id) => diesel::update(
            reinspection_obligations::table
                .filter(
                    reinspection_obligations::establishment_id.eq(obligation.establishment_id),
                )
                .filter(reinspection_obligations::inspection_id.eq(inspection_id)),
        )
        .set(overwrite)
        .execute(conn)?,
        None => diesel::update(
            reinspection_obligations::table
                .filter(
                    reinspection_obligations::establishment_id.eq(obligation.establishment_id),
                )
                .filter(reinspection_obligations::inspection_id.is_null()),
        )
        .set(overwrite)
        .execute(conn)?,
    };

    if updated > 0 {
        debug!(
            establishment_id = obligation.establishment_id,
            "Overwrote existing reinspection obligation"
        );
        return Ok(());
    }

    diesel::insert_into(reinspection_obligations::table)
        .values((
            reinspection_obligations::establishment_id.eq(obligation.establishment_id),
            reinspection_obligations::inspection_id.eq(obligation.inspection_id),
            reinspection_obligations::outcome.eq(obligation.outcome.as_str()),
            reinspection_obligations::due_date.eq(&due_date),
            reinspection_obligations::status.eq(obligation.status.as_str()),
            reinspection_obligations::reminder_sent.eq(i32::from(obligation.reminder_sent)),
        ))
        .execute(conn)?;
    Ok(())
}

/// Marks an obligation's reminder as sent.
///
/// # Errors
///
/// Returns `ObligationNotFound` when no row matches.
pub fn mark_reminder_sent(
    conn: &mut SqliteConnection,
    obligation_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(reinspection_obligations::table.find(obligation_id))
        .set(reinspection_obligations::reminder_sent.eq(1))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::ObligationNotFound(obligation_id));
    }
    Ok(())
}

/// Marks an obligation as completed.
///
/// Called when a follow-up inspection is created for the establishment.
///
/// # Errors
///
/// Returns `ObligationNotFound` when no row matches.
pub fn complete_obligation(
    conn: &mut SqliteConnection,
    obligation_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(reinspection_obligations::table.find(obligation_id))
        .set(reinspection_obligations::status.eq(ObligationStatus::Completed.as_str()))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::ObligationNotFound(obligation_id));
    }
    Ok(())
}

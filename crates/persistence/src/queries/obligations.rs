// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reinspection obligation queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::{ObligationStatus, ReinspectionObligation};
use time::Date;

use crate::data_models::{ObligationRow, encode_date};
use crate::diesel_schema::reinspection_obligations;
use crate::error::PersistenceError;

/// Filter for [`list_obligations`].
#[derive(Debug, Clone, Default)]
pub struct ObligationListFilter {
    /// Restrict to one establishment.
    pub establishment_id: Option<i64>,
    /// Restrict to obligations due on or before this date.
    pub due_on_or_before: Option<Date>,
    /// Restrict to pending obligations.
    pub pending_only: bool,
    /// Restrict to obligations whose reminder has not been sent.
    pub reminder_not_sent: bool,
}

/// Lists obligations matching the filter, earliest due date first.
///
/// The reminder sweep asks for pending obligations due within its
/// window whose reminder is still unsent.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_obligations(
    conn: &mut SqliteConnection,
    filter: &ObligationListFilter,
) -> Result<Vec<ReinspectionObligation>, PersistenceError> {
    let mut query = reinspection_obligations::table.into_boxed();

    if let Some(establishment_id) = filter.establishment_id {
        query =
            query.filter(reinspection_obligations::establishment_id.eq(establishment_id));
    }
    if let Some(due) = filter.due_on_or_before {
        // ISO dates compare correctly as text.
        query = query.filter(reinspection_obligations::due_date.le(encode_date(due)?));
    }
    if filter.pending_only {
        query = query
            .filter(reinspection_obligations::status.eq(ObligationStatus::Pending.as_str()));
    }
    if filter.reminder_not_sent {
        query = query.filter(reinspection_obligations::reminder_sent.eq(0));
    }

    let rows: Vec<ObligationRow> = query
        .order(reinspection_obligations::due_date.asc())
        .select(ObligationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(ObligationRow::into_domain).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification feed queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{NotificationRecord, NotificationRow};
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Notifications for a recipient, newest first.
///
/// # Arguments
///
/// * `recipient_id` - The recipient officer
/// * `unread_only` - Restrict to unread notifications
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn notifications_for(
    conn: &mut SqliteConnection,
    recipient_id: i64,
    unread_only: bool,
) -> Result<Vec<NotificationRecord>, PersistenceError> {
    let mut query = notifications::table
        .filter(notifications::recipient_id.eq(recipient_id))
        .into_boxed();
    if unread_only {
        query = query.filter(notifications::read.eq(0));
    }

    let rows: Vec<NotificationRow> = query
        .order(notifications::notification_id.desc())
        .select(NotificationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(NotificationRow::into_domain).collect()
}

/// Number of unread notifications for a recipient.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn unread_count(
    conn: &mut SqliteConnection,
    recipient_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::recipient_id.eq(recipient_id))
        .filter(notifications::read.eq(0))
        .count()
        .get_result(conn)?)
}

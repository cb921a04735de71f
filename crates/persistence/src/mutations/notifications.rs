// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_events::Notification;

use crate::data_models::encode_timestamp;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Inserts a notification row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    notification: &Notification,
) -> Result<(), PersistenceError> {
    diesel::insert_into(notifications::table)
        .values((
            notifications::recipient_id.eq(notification.recipient_id),
            notifications::sender_id.eq(notification.sender_id),
            notifications::kind.eq(notification.kind.as_str()),
            notifications::title.eq(&notification.title),
            notifications::message.eq(&notification.message),
            notifications::related_inspection.eq(notification.related_inspection),
            notifications::read.eq(i32::from(notification.read)),
            notifications::created_at.eq(encode_timestamp(notification.created_at)?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Marks a notification as read.
///
/// # Errors
///
/// Returns `NotificationNotFound` when no row matches.
pub fn mark_notification_read(
    conn: &mut SqliteConnection,
    notification_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(notifications::table.find(notification_id))
        .set(notifications::read.eq(1))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotificationNotFound(notification_id));
    }
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use emb_inspect_domain::InspectionState;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An immutable record of one state transition.
///
/// Every successful transition appends exactly one history entry; the
/// monitoring completion appends two (the completion plus the chained
/// review step). Entries are append-only and ordered by commit time.
/// The actor's name is denormalized so history survives officer
/// deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The state before the transition. `None` for the creating entry.
    pub previous_state: Option<InspectionState>,
    /// The state after the transition.
    pub new_state: InspectionState,
    /// The officer who performed the action. `None` once the officer
    /// row has been removed; `actor_name` still identifies them.
    pub actor_id: Option<i64>,
    /// The actor's display name at the time of the action.
    pub actor_name: String,
    /// Optional free-form remarks (penalty amounts, override reasons).
    pub remarks: Option<String>,
    /// When the transition was performed.
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    /// Creates a new history entry.
    #[must_use]
    pub const fn new(
        previous_state: Option<InspectionState>,
        new_state: InspectionState,
        actor_id: i64,
        actor_name: String,
        remarks: Option<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            previous_state,
            new_state,
            actor_id: Some(actor_id),
            actor_name,
            remarks,
            timestamp,
        }
    }
}

/// The category of an in-app notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// An inspection was forwarded to the recipient.
    InspectionForward,
    /// An inspection reached the recipient's review stage.
    InspectionReview,
    /// A stage the recipient follows was completed.
    InspectionCompleted,
    /// An inspection was returned to the recipient's stage.
    InspectionReturn,
    /// A new establishment was registered.
    NewEstablishment,
    /// A new officer account was created.
    NewUser,
}

impl NotificationKind {
    /// Returns the stored string for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InspectionForward => "inspection_forward",
            Self::InspectionReview => "inspection_review",
            Self::InspectionCompleted => "inspection_completed",
            Self::InspectionReturn => "inspection_return",
            Self::NewEstablishment => "new_establishment",
            Self::NewUser => "new_user",
        }
    }

    /// Parses a stored kind string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inspection_forward" => Some(Self::InspectionForward),
            "inspection_review" => Some(Self::InspectionReview),
            "inspection_completed" => Some(Self::InspectionCompleted),
            "inspection_return" => Some(Self::InspectionReturn),
            "new_establishment" => Some(Self::NewEstablishment),
            "new_user" => Some(Self::NewUser),
            _ => None,
        }
    }
}

/// An in-app notification for one officer.
///
/// Notifications are persisted inside the same transaction as the state
/// change that produced them; they are never lost to a delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The officer receiving the notification.
    pub recipient_id: i64,
    /// The officer whose action produced it, if any.
    pub sender_id: Option<i64>,
    /// The notification category.
    pub kind: NotificationKind,
    /// Short title for list display.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// The inspection this notification refers to, if any.
    pub related_inspection: Option<i64>,
    /// Whether the recipient has read it.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

impl Notification {
    /// Creates a new unread notification.
    #[must_use]
    pub const fn new(
        recipient_id: i64,
        sender_id: Option<i64>,
        kind: NotificationKind,
        title: String,
        message: String,
        related_inspection: Option<i64>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            recipient_id,
            sender_id,
            kind,
            title,
            message,
            related_inspection,
            read: false,
            created_at,
        }
    }
}

/// An outbound email produced by a transition.
///
/// Emails are best-effort: they are dispatched after the transaction
/// commits, and failures never affect the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl EmailMessage {
    /// Creates a new email message.
    #[must_use]
    pub const fn new(to: String, subject: String, body: String) -> Self {
        Self { to, subject, body }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the EMB inspection workflow.
//!
//! Built on Diesel over `SQLite`. The adapter owns a single connection;
//! the server serializes access to it, which gives every request
//! read-validate-commit exclusivity without row locks.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases. Each call to
//! [`SqlitePersistence::new_in_memory`] receives a fresh database via an
//! atomic counter, so tests are isolated without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use emb_inspect::{ActionOutcome, CreationOutcome};
use emb_inspect_domain::{
    Establishment, Inspection, InspectionCode, InspectionDocument, InspectionState, Officer,
    ReinspectionObligation,
};
use emb_inspect_events::{HistoryEntry, Notification};
use time::OffsetDateTime;

pub mod data_models;
pub mod diesel_schema;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::NotificationRecord;
pub use error::PersistenceError;
pub use queries::inspections::InspectionListFilter;
pub use queries::obligations::ObligationListFilter;
pub use queries::officers::OfficerListFilter;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Officers
    // ========================================================================

    /// Creates a new officer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_officer(&mut self, officer: &Officer) -> Result<i64, PersistenceError> {
        mutations::officers::create_officer(&mut self.conn, officer)
    }

    /// Updates an officer's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `OfficerNotFound` when no row matches.
    pub fn update_officer(
        &mut self,
        officer_id: i64,
        officer: &Officer,
    ) -> Result<(), PersistenceError> {
        mutations::officers::update_officer(&mut self.conn, officer_id, officer)
    }

    /// Activates or deactivates an officer.
    ///
    /// # Errors
    ///
    /// Returns `OfficerNotFound` when no row matches.
    pub fn set_officer_active(
        &mut self,
        officer_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::officers::set_officer_active(&mut self.conn, officer_id, active)
    }

    /// Retrieves an officer by id.
    ///
    /// # Errors
    ///
    /// Returns `OfficerNotFound` when no row matches.
    pub fn get_officer(&mut self, officer_id: i64) -> Result<Officer, PersistenceError> {
        queries::officers::get_officer(&mut self.conn, officer_id)
    }

    /// Retrieves an officer by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` when the
    /// officer is not found.
    pub fn get_officer_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<Officer>, PersistenceError> {
        queries::officers::get_officer_by_email(&mut self.conn, email)
    }

    /// Lists officers matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_officers(
        &mut self,
        filter: &OfficerListFilter,
    ) -> Result<Vec<Officer>, PersistenceError> {
        queries::officers::list_officers(&mut self.conn, filter)
    }

    /// Loads the active-officer roster snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_active_officers(&mut self) -> Result<Vec<Officer>, PersistenceError> {
        queries::officers::load_active_officers(&mut self.conn)
    }

    // ========================================================================
    // Establishments
    // ========================================================================

    /// Creates a new establishment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_establishment(
        &mut self,
        establishment: &Establishment,
    ) -> Result<i64, PersistenceError> {
        mutations::establishments::create_establishment(&mut self.conn, establishment)
    }

    /// Retrieves an establishment by id.
    ///
    /// # Errors
    ///
    /// Returns `EstablishmentNotFound` when no row matches.
    pub fn get_establishment(
        &mut self,
        establishment_id: i64,
    ) -> Result<Establishment, PersistenceError> {
        queries::establishments::get_establishment(&mut self.conn, establishment_id)
    }

    /// Lists all establishments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_establishments(&mut self) -> Result<Vec<Establishment>, PersistenceError> {
        queries::establishments::list_establishments(&mut self.conn)
    }

    /// Contact addresses for an inspection's establishments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn contacts_for_inspection(
        &mut self,
        inspection_id: i64,
    ) -> Result<Vec<(i64, String)>, PersistenceError> {
        queries::establishments::contacts_for_inspection(&mut self.conn, inspection_id)
    }

    // ========================================================================
    // Inspections
    // ========================================================================

    /// Persists a freshly created inspection, allocating its code.
    ///
    /// # Errors
    ///
    /// Returns an error if any write in the transaction fails.
    pub fn persist_creation(
        &mut self,
        outcome: &CreationOutcome,
    ) -> Result<(i64, InspectionCode), PersistenceError> {
        mutations::inspections::persist_creation(&mut self.conn, outcome)
    }

    /// Applies a committed action outcome atomically.
    ///
    /// # Errors
    ///
    /// Returns `InspectionNotFound` when the aggregate does not exist,
    /// or an error if any write in the transaction fails.
    pub fn apply_transition(
        &mut self,
        inspection_id: i64,
        outcome: &ActionOutcome,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::inspections::apply_transition(&mut self.conn, inspection_id, outcome, now)
    }

    /// Administrative out-of-band state override.
    ///
    /// # Errors
    ///
    /// Returns `InspectionNotFound` when the aggregate does not exist.
    pub fn override_inspection_state(
        &mut self,
        inspection_id: i64,
        new_state: InspectionState,
        assignee: Option<i64>,
        history: &HistoryEntry,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::inspections::override_state(
            &mut self.conn,
            inspection_id,
            new_state,
            assignee,
            history,
            now,
        )
    }

    /// Attaches a document to an inspection.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_document(
        &mut self,
        inspection_id: i64,
        document: &InspectionDocument,
    ) -> Result<i64, PersistenceError> {
        mutations::inspections::add_document(&mut self.conn, inspection_id, document)
    }

    /// Loads a full inspection aggregate.
    ///
    /// # Errors
    ///
    /// Returns `InspectionNotFound` when no row matches.
    pub fn load_inspection(&mut self, inspection_id: i64) -> Result<Inspection, PersistenceError> {
        queries::inspections::load_inspection(&mut self.conn, inspection_id)
    }

    /// Loads an inspection by its public code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` when no
    /// inspection carries the code.
    pub fn find_by_code(
        &mut self,
        code: &InspectionCode,
    ) -> Result<Option<Inspection>, PersistenceError> {
        queries::inspections::find_by_code(&mut self.conn, code)
    }

    /// Lists inspections matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_inspections(
        &mut self,
        filter: &InspectionListFilter,
    ) -> Result<Vec<Inspection>, PersistenceError> {
        queries::inspections::list_inspections(&mut self.conn, filter)
    }

    /// Full history of an inspection, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn history_for(
        &mut self,
        inspection_id: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::inspections::history_for(&mut self.conn, inspection_id)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Inserts a notification outside a workflow transaction (officer
    /// and establishment registration notices).
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<(), PersistenceError> {
        mutations::notifications::insert_notification(&mut self.conn, notification)
    }

    /// Notifications for a recipient, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn notifications_for(
        &mut self,
        recipient_id: i64,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, PersistenceError> {
        queries::notifications::notifications_for(&mut self.conn, recipient_id, unread_only)
    }

    /// Number of unread notifications for a recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn unread_count(&mut self, recipient_id: i64) -> Result<i64, PersistenceError> {
        queries::notifications::unread_count(&mut self.conn, recipient_id)
    }

    /// Marks a notification as read.
    ///
    /// # Errors
    ///
    /// Returns `NotificationNotFound` when no row matches.
    pub fn mark_notification_read(
        &mut self,
        notification_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::notifications::mark_notification_read(&mut self.conn, notification_id)
    }

    // ========================================================================
    // Reinspection obligations
    // ========================================================================

    /// Lists obligations matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_obligations(
        &mut self,
        filter: &ObligationListFilter,
    ) -> Result<Vec<ReinspectionObligation>, PersistenceError> {
        queries::obligations::list_obligations(&mut self.conn, filter)
    }

    /// Marks an obligation's reminder as sent.
    ///
    /// # Errors
    ///
    /// Returns `ObligationNotFound` when no row matches.
    pub fn mark_reminder_sent(&mut self, obligation_id: i64) -> Result<(), PersistenceError> {
        mutations::obligations::mark_reminder_sent(&mut self.conn, obligation_id)
    }

    /// Marks an obligation as completed.
    ///
    /// # Errors
    ///
    /// Returns `ObligationNotFound` when no row matches.
    pub fn complete_obligation(&mut self, obligation_id: i64) -> Result<(), PersistenceError> {
        mutations::obligations::complete_obligation(&mut self.conn, obligation_id)
    }
}

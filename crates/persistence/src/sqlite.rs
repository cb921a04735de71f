// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite`-specific backend utilities.
//!
//! Connection initialization, schema creation, and the small set of
//! helpers that cannot be expressed in Diesel DSL (PRAGMA statements,
//! `last_insert_rowid()`). Domain queries and mutations live in the
//! `queries` and `mutations` modules.

use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tracing::info;

use crate::error::PersistenceError;

/// The full schema, applied at connection time.
///
/// The partial unique indexes are a database-level backstop for the
/// role-slot invariants enforced in the domain layer: one active
/// Division Chief, and one active officer per exact
/// (role, section, district) slot. The combined section marker is its
/// own `law_section` value and therefore its own slot.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS officers (
    officer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    law_section TEXT,
    district TEXT,
    active INTEGER NOT NULL DEFAULT 1
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_officers_division_chief
    ON officers (role)
    WHERE role = 'DIVISION_CHIEF' AND active = 1;

CREATE UNIQUE INDEX IF NOT EXISTS idx_officers_scoped_slot
    ON officers (role, law_section, ifnull(district, ''))
    WHERE active = 1
      AND role IN ('SECTION_CHIEF', 'UNIT_HEAD', 'MONITORING_PERSONNEL');

CREATE TABLE IF NOT EXISTS establishments (
    establishment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    province TEXT NOT NULL,
    city TEXT NOT NULL,
    contact_email TEXT
);

CREATE TABLE IF NOT EXISTS inspections (
    inspection_id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    law TEXT NOT NULL,
    district TEXT,
    current_state TEXT NOT NULL,
    current_assignee INTEGER REFERENCES officers (officer_id),
    created_by INTEGER NOT NULL REFERENCES officers (officer_id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS inspection_establishments (
    link_id INTEGER PRIMARY KEY AUTOINCREMENT,
    inspection_id INTEGER NOT NULL REFERENCES inspections (inspection_id),
    establishment_id INTEGER NOT NULL REFERENCES establishments (establishment_id),
    UNIQUE (inspection_id, establishment_id)
);

CREATE TABLE IF NOT EXISTS inspection_forms (
    form_id INTEGER PRIMARY KEY AUTOINCREMENT,
    inspection_id INTEGER NOT NULL UNIQUE REFERENCES inspections (inspection_id),
    scheduled_at TEXT,
    inspection_notes TEXT,
    checklist TEXT,
    findings_summary TEXT,
    compliance_decision TEXT,
    violations_found TEXT,
    compliance_plan TEXT,
    compliance_deadline TEXT
);

CREATE TABLE IF NOT EXISTS inspection_documents (
    document_id INTEGER PRIMARY KEY AUTOINCREMENT,
    inspection_id INTEGER NOT NULL REFERENCES inspections (inspection_id),
    file_ref TEXT NOT NULL,
    doc_type TEXT NOT NULL,
    uploaded_by INTEGER REFERENCES officers (officer_id) ON DELETE SET NULL,
    uploaded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS inspection_history (
    history_id INTEGER PRIMARY KEY AUTOINCREMENT,
    inspection_id INTEGER NOT NULL REFERENCES inspections (inspection_id),
    previous_state TEXT,
    new_state TEXT NOT NULL,
    actor_id INTEGER REFERENCES officers (officer_id) ON DELETE SET NULL,
    actor_name TEXT NOT NULL,
    remarks TEXT,
    occurred_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notifications (
    notification_id INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient_id INTEGER REFERENCES officers (officer_id) ON DELETE SET NULL,
    sender_id INTEGER REFERENCES officers (officer_id) ON DELETE SET NULL,
    kind TEXT NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    related_inspection INTEGER REFERENCES inspections (inspection_id) ON DELETE SET NULL,
    read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reinspection_obligations (
    obligation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    establishment_id INTEGER NOT NULL REFERENCES establishments (establishment_id),
    inspection_id INTEGER REFERENCES inspections (inspection_id),
    outcome TEXT NOT NULL,
    due_date TEXT NOT NULL,
    status TEXT NOT NULL,
    reminder_sent INTEGER NOT NULL DEFAULT 0
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_obligations_upsert_key
    ON reinspection_obligations (establishment_id, ifnull(inspection_id, 0));
";

/// Helper row struct for PRAGMA queries.
///
/// This is a justified use of raw SQL as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Helper function to get the last inserted row ID.
///
/// `SQLite` doesn't support `RETURNING` clauses in all contexts,
/// so we must query `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// Without it the database cannot guarantee the referential integrity
/// constraints the schema declares.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Enables WAL mode for better read concurrency on file databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    conn.batch_execute("PRAGMA journal_mode = WAL")
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and apply the schema.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (shared-memory or file path)
///
/// # Errors
///
/// Returns an error if connection or schema creation fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Enable foreign key enforcement
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    conn.batch_execute(SCHEMA)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    Ok(conn)
}

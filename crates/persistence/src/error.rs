// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use emb_inspect_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested inspection was not found.
    InspectionNotFound(i64),
    /// The requested officer was not found.
    OfficerNotFound(i64),
    /// The requested establishment was not found.
    EstablishmentNotFound(i64),
    /// The requested notification was not found.
    NotificationNotFound(i64),
    /// The requested obligation was not found.
    ObligationNotFound(i64),
    /// Code allocation kept colliding with concurrent writers.
    CodeAllocationExhausted(String),
    /// The four-digit sequence space for a (law, year) pair is full.
    CodeSpaceExhausted(String),
    /// A stored row could not be decoded back into its domain type.
    CorruptRow(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::InspectionNotFound(id) => write!(f, "Inspection not found: {id}"),
            Self::OfficerNotFound(id) => write!(f, "Officer not found: {id}"),
            Self::EstablishmentNotFound(id) => write!(f, "Establishment not found: {id}"),
            Self::NotificationNotFound(id) => write!(f, "Notification not found: {id}"),
            Self::ObligationNotFound(id) => write!(f, "Obligation not found: {id}"),
            Self::CodeAllocationExhausted(prefix) => {
                write!(f, "Could not allocate an inspection code for {prefix}")
            }
            Self::CodeSpaceExhausted(prefix) => {
                write!(f, "Inspection code space is exhausted for {prefix}")
            }
            Self::CorruptRow(msg) => write!(f, "Stored row could not be decoded: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::CorruptRow(err.to_string())
    }
}

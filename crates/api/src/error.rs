// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use emb_inspect::CoreError;
use emb_inspect_domain::DomainError;
use emb_inspect_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Each variant carries a stable machine-readable code so
/// clients can branch without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The (state, action) combination is not allowed, or a transition
    /// precondition failed.
    InvalidTransition {
        /// A human-readable description.
        message: String,
    },
    /// The actor is not the current assignee.
    NotAssignedToYou {
        /// A human-readable description.
        message: String,
    },
    /// The actor's role may not perform this action.
    PermissionDenied {
        /// A human-readable description.
        message: String,
    },
    /// Assignee resolution failed for the target state.
    NoAssigneeFound {
        /// A human-readable description.
        message: String,
    },
    /// Another active officer already holds the role slot.
    RoleSlotOccupied {
        /// A human-readable description.
        message: String,
    },
    /// The request payload is missing or malformed.
    Validation {
        /// The offending field.
        field: String,
        /// A human-readable description.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable error code for this variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NotAssignedToYou { .. } => "not_assigned_to_you",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::NoAssigneeFound { .. } => "no_assignee_found",
            Self::RoleSlotOccupied { .. } => "role_slot_occupied",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { message }
            | Self::NotAssignedToYou { message }
            | Self::PermissionDenied { message }
            | Self::NoAssigneeFound { message }
            | Self::RoleSlotOccupied { message } => {
                write!(f, "{message}")
            }
            Self::Validation { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidLaw(code) => ApiError::Validation {
            field: String::from("law"),
            message: format!("Unknown law code: '{code}'"),
        },
        DomainError::InvalidLawSection(s) => ApiError::Validation {
            field: String::from("law_section"),
            message: format!("Unknown law section: '{s}'"),
        },
        DomainError::InvalidRole(s) => ApiError::Validation {
            field: String::from("role"),
            message: format!("Unknown role: '{s}'"),
        },
        DomainError::InvalidState(s) => ApiError::Validation {
            field: String::from("state"),
            message: format!("Unknown inspection state: '{s}'"),
        },
        DomainError::InvalidAction(s) => ApiError::Validation {
            field: String::from("action"),
            message: format!("Unknown action: '{s}'"),
        },
        DomainError::InvalidComplianceDecision(s) => ApiError::Validation {
            field: String::from("decision"),
            message: format!("Unknown compliance decision: '{s}'"),
        },
        DomainError::InvalidObligationStatus(s) => ApiError::Validation {
            field: String::from("status"),
            message: format!("Unknown obligation status: '{s}'"),
        },
        DomainError::InvalidCode(s) => ApiError::Validation {
            field: String::from("code"),
            message: format!("Invalid inspection code: '{s}'"),
        },
        DomainError::InvalidEmail(s) => ApiError::Validation {
            field: String::from("email"),
            message: format!("Invalid officer email: '{s}'"),
        },
        DomainError::InvalidName(s) => ApiError::Validation {
            field: String::from("name"),
            message: format!("Invalid officer name: '{s}'"),
        },
        DomainError::MissingLawSection { role } => ApiError::Validation {
            field: String::from("law_section"),
            message: format!("Role {role} requires a law section"),
        },
        DomainError::UnexpectedLawSection { role } => ApiError::Validation {
            field: String::from("law_section"),
            message: format!("Role {role} must not carry a law section"),
        },
        DomainError::RoleSlotOccupied { .. } => ApiError::RoleSlotOccupied {
            message: err.to_string(),
        },
        DomainError::EmptyEstablishments => ApiError::Validation {
            field: String::from("establishments"),
            message: String::from("An inspection must cover at least one establishment"),
        },
        DomainError::UnpersistedOfficer(email) => ApiError::Internal {
            message: format!("Officer '{email}' has no persisted id"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::Validation {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::InvalidTransition { .. } => ApiError::InvalidTransition { message },
        CoreError::NotAssignedToYou { .. } => ApiError::NotAssignedToYou { message },
        CoreError::PermissionDenied { .. } => ApiError::PermissionDenied { message },
        CoreError::NoAssigneeFound { .. } => ApiError::NoAssigneeFound { message },
        CoreError::Validation { field, message } => ApiError::Validation { field, message },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing-row errors become `NotFound`; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::InspectionNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Inspection"),
            message: format!("Inspection {id} does not exist"),
        },
        PersistenceError::OfficerNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Officer"),
            message: format!("Officer {id} does not exist"),
        },
        PersistenceError::EstablishmentNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Establishment"),
            message: format!("Establishment {id} does not exist"),
        },
        PersistenceError::NotificationNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {id} does not exist"),
        },
        PersistenceError::ObligationNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Reinspection obligation"),
            message: format!("Obligation {id} does not exist"),
        },
        PersistenceError::NotFound(what) => ApiError::NotFound {
            resource_type: String::from("Resource"),
            message: what,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use emb_inspect_domain::{DomainError, InspectionAction, InspectionState, Role};

/// Errors that can occur while applying a workflow command.
///
/// These never corrupt state: a failed command leaves the aggregate
/// exactly as it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The (state, action) pair is not in the transition table, or a
    /// transition precondition failed.
    InvalidTransition {
        /// The inspection's current state.
        state: InspectionState,
        /// The attempted action.
        action: InspectionAction,
    },
    /// The action exists at this state but the actor is not the current
    /// assignee.
    NotAssignedToYou {
        /// The attempted action.
        action: InspectionAction,
    },
    /// The actor's role may not invoke this action at all.
    PermissionDenied {
        /// The attempted action.
        action: String,
        /// The actor's role.
        role: Role,
    },
    /// No officer could be resolved for the target state.
    NoAssigneeFound {
        /// The state that could not be staffed.
        target_state: InspectionState,
    },
    /// The payload is missing a field the chosen transition requires.
    Validation {
        /// The offending field.
        field: String,
        /// A human-readable description.
        message: String,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { state, action } => {
                write!(f, "Action '{action}' is not valid in state {state}")
            }
            Self::NotAssignedToYou { action } => {
                write!(f, "Action '{action}' requires the current assignment")
            }
            Self::PermissionDenied { action, role } => {
                write!(f, "Role {role} is not permitted to perform '{action}'")
            }
            Self::NoAssigneeFound { target_state } => {
                write!(f, "No active officer found for state {target_state}")
            }
            Self::Validation { field, message } => {
                write!(f, "Invalid payload field '{field}': {message}")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

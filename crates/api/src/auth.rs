// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor authentication and role checks.
//!
//! Bearer-token validation is handled by an external collaborator; by
//! the time a request reaches this layer it carries a trusted officer
//! id. This module resolves that id against the roster and enforces
//! the active flag, so a deactivated officer loses access immediately.

use emb_inspect_domain::{Officer, Role};
use emb_inspect_persistence::{PersistenceError, SqlitePersistence};

use crate::error::ApiError;

/// Resolves the acting officer by id and verifies they are active.
///
/// # Errors
///
/// Returns `PermissionDenied` when the officer does not exist or has
/// been deactivated. The distinction is deliberately not surfaced.
pub fn authenticate_officer(
    persistence: &mut SqlitePersistence,
    officer_id: i64,
) -> Result<Officer, ApiError> {
    let officer: Officer = persistence.get_officer(officer_id).map_err(|e| match e {
        PersistenceError::OfficerNotFound(_) => ApiError::PermissionDenied {
            message: String::from("Unknown officer"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    })?;

    if !officer.active {
        return Err(ApiError::PermissionDenied {
            message: String::from("Officer account is deactivated"),
        });
    }

    Ok(officer)
}

/// Requires the actor to hold the given role.
///
/// # Errors
///
/// Returns `PermissionDenied` naming the required role.
pub fn require_role(actor: &Officer, required: Role) -> Result<(), ApiError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied {
            message: format!("This action requires the {required} role"),
        })
    }
}

/// Requires the actor to hold one of the given roles.
///
/// # Errors
///
/// Returns `PermissionDenied` naming the accepted roles.
pub fn require_one_of(actor: &Officer, accepted: &[Role]) -> Result<(), ApiError> {
    if accepted.contains(&actor.role) {
        Ok(())
    } else {
        let names: Vec<&str> = accepted.iter().map(Role::as_str).collect();
        Err(ApiError::PermissionDenied {
            message: format!("This action requires one of: {}", names.join(", ")),
        })
    }
}

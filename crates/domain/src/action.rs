// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An action verb a caller may invoke on an existing inspection.
///
/// Creation is not an action on an existing aggregate and is modeled
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionAction {
    /// Claim an assignment slot that is empty or already one's own.
    AssignToMe,
    /// Begin work at the current stage.
    Start,
    /// Finish work at the current stage.
    Complete,
    /// Hand the inspection to the next stage.
    Forward,
    /// Approve at the current review stage and pass upward.
    Review,
    /// Send a non-compliant outcome to the Legal Unit.
    ForwardToLegal,
    /// Issue a Notice of Violation.
    SendNov,
    /// Issue a Notice of Order.
    SendNoo,
    /// Close the inspection.
    Close,
}

impl InspectionAction {
    /// Returns the URL / wire verb for this action.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::AssignToMe => "assign_to_me",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Forward => "forward",
            Self::Review => "review",
            Self::ForwardToLegal => "forward_to_legal",
            Self::SendNov => "send_nov",
            Self::SendNoo => "send_noo",
            Self::Close => "close",
        }
    }
}

impl FromStr for InspectionAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assign_to_me" => Ok(Self::AssignToMe),
            "start" => Ok(Self::Start),
            "complete" => Ok(Self::Complete),
            "forward" => Ok(Self::Forward),
            "review" => Ok(Self::Review),
            "forward_to_legal" => Ok(Self::ForwardToLegal),
            "send_nov" => Ok(Self::SendNov),
            "send_noo" => Ok(Self::SendNoo),
            "close" => Ok(Self::Close),
            _ => Err(DomainError::InvalidAction(s.to_string())),
        }
    }
}

impl std::fmt::Display for InspectionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.verb())
    }
}

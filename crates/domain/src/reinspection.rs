// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::form::ComplianceDecision;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration};

/// Days until reinspection after a compliant closure (~2.5 years).
pub const COMPLIANT_REINSPECTION_DAYS: i64 = 912;

/// Days until reinspection after a non-compliant closure.
pub const NON_COMPLIANT_REINSPECTION_DAYS: i64 = 365;

/// Whether a reinspection obligation is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObligationStatus {
    /// The follow-up inspection has not happened yet.
    Pending,
    /// The follow-up inspection has been performed.
    Completed,
}

impl ObligationStatus {
    /// Returns the stored string for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
        }
    }
}

impl FromStr for ObligationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidObligationStatus(s.to_string())),
        }
    }
}

/// A dated follow-up obligation created when an inspection closes.
///
/// One row per (establishment, origin inspection). Re-closing the same
/// inspection overwrites the row and resets the reminder flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinspectionObligation {
    /// Canonical identifier assigned by the database.
    pub obligation_id: Option<i64>,
    /// The establishment owing a reinspection.
    pub establishment_id: i64,
    /// The closed inspection this obligation derives from.
    pub inspection_id: Option<i64>,
    /// The compliance outcome of the originating closure.
    pub outcome: ComplianceDecision,
    /// When the reinspection falls due.
    pub due_date: Date,
    /// Whether the obligation is still outstanding.
    pub status: ObligationStatus,
    /// Whether a reminder has been sent for this obligation.
    pub reminder_sent: bool,
}

/// Computes the reinspection due date for a closure.
///
/// Compliant outcomes fall due after [`COMPLIANT_REINSPECTION_DAYS`],
/// non-compliant after [`NON_COMPLIANT_REINSPECTION_DAYS`].
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the addition leaves
/// the representable date range.
pub fn reinspection_due_date(
    outcome: ComplianceDecision,
    closed_on: Date,
) -> Result<Date, DomainError> {
    let days: i64 = match outcome {
        ComplianceDecision::Compliant => COMPLIANT_REINSPECTION_DAYS,
        ComplianceDecision::NonCompliant => NON_COMPLIANT_REINSPECTION_DAYS,
    };
    closed_on
        .checked_add(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("reinspection due date: {closed_on} + {days} days"),
        })
}

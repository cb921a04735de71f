// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::district::District;
use crate::error::DomainError;
use crate::form::InspectionForm;
use crate::law::Law;
use crate::state::InspectionState;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// A regulated establishment subject to inspection.
///
/// Establishment management is an external collaborator; this is the
/// minimal surface the workflow engine references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Establishment {
    /// Canonical identifier assigned by the database.
    pub establishment_id: Option<i64>,
    /// Establishment name.
    pub name: String,
    /// Province of the establishment's location.
    pub province: String,
    /// City or municipality of the establishment's location.
    pub city: String,
    /// Contact address for legal notices, if known.
    pub contact_email: Option<String>,
}

/// A human-readable inspection code, e.g. `EIA-2024-0001`.
///
/// Format: `<LAWPREFIX>-<YEAR>-<SEQ>` where the sequence is four digits,
/// per (law, year), gap-tolerant, and globally unique. Assigned exactly
/// once at first persist; a stable external contract that clients search
/// and display by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InspectionCode {
    value: String,
}

impl InspectionCode {
    /// Formats a code from its parts.
    #[must_use]
    pub fn format(law: Law, year: i32, sequence: u32) -> Self {
        Self {
            value: format!("{}-{year:04}-{sequence:04}", law.code_prefix()),
        }
    }

    /// Returns the code string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses and validates a code string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCode` unless the string matches
    /// `<EIA|TOX|AIR|WATER|WASTE>-<4 digits>-<4 digits>`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidCode(s.to_string());

        let mut parts = s.split('-');
        let prefix: &str = parts.next().ok_or_else(invalid)?;
        let year: &str = parts.next().ok_or_else(invalid)?;
        let seq: &str = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        if !Law::ALL.iter().any(|law| law.code_prefix() == prefix) {
            return Err(invalid());
        }
        let four_digits = |p: &str| p.len() == 4 && p.chars().all(|c| c.is_ascii_digit());
        if !four_digits(year) || !four_digits(seq) {
            return Err(invalid());
        }

        Ok(Self {
            value: s.to_string(),
        })
    }
}

impl FromStr for InspectionCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for InspectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The inspection aggregate root.
///
/// Binds establishments, the law inspected under, the derived district,
/// the current workflow state, the current assignee, and the embedded
/// form. The current assignee is authoritative; per-role attribution is
/// derived from history when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    /// Canonical identifier assigned by the database.
    pub inspection_id: Option<i64>,
    /// Human-readable code, assigned exactly once at first persist.
    pub code: Option<InspectionCode>,
    /// Establishments under inspection. Never empty.
    pub establishment_ids: Vec<i64>,
    /// The law this inspection is conducted under.
    pub law: Law,
    /// District resolved from the first establishment's location at
    /// creation. Absent when the location is not in the lookup table.
    pub district: Option<District>,
    /// Current workflow state.
    pub current_state: InspectionState,
    /// The officer owning the current state; empty iff the state is
    /// terminal.
    pub current_assignee: Option<i64>,
    /// The Division Chief who created the inspection.
    pub created_by: i64,
    /// The embedded form, created together with the inspection.
    pub form: InspectionForm,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last mutation timestamp.
    pub updated_at: OffsetDateTime,
}

impl Inspection {
    /// Validates structural invariants that hold independent of state:
    /// at least one establishment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyEstablishments` when no establishment
    /// is attached.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.establishment_ids.is_empty() {
            return Err(DomainError::EmptyEstablishments);
        }
        Ok(())
    }
}

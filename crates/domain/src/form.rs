// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Monitoring's verdict on an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceDecision {
    /// The establishment complies with the law inspected under.
    Compliant,
    /// Violations were found.
    NonCompliant,
}

impl ComplianceDecision {
    /// Returns the stored string for this decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON_COMPLIANT",
        }
    }
}

impl FromStr for ComplianceDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLIANT" => Ok(Self::Compliant),
            "NON_COMPLIANT" => Ok(Self::NonCompliant),
            _ => Err(DomainError::InvalidComplianceDecision(s.to_string())),
        }
    }
}

impl std::fmt::Display for ComplianceDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file attached to an inspection form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionDocument {
    /// Canonical identifier assigned by the database.
    pub document_id: Option<i64>,
    /// Storage reference for the uploaded file.
    pub file_ref: String,
    /// Document type tag (e.g. "permit", "photo", "lab_result").
    pub doc_type: String,
    /// The officer who uploaded the document, if still known.
    pub uploaded_by: Option<i64>,
    /// Upload timestamp.
    pub uploaded_at: OffsetDateTime,
}

/// The inspection form embedded 1:1 within an inspection.
///
/// Created together with its inspection and shares its lifetime. Fields
/// fill in as the workflow progresses; the NOV / NOO transitions write
/// the violation, plan, and deadline fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionForm {
    /// Canonical identifier assigned by the database.
    pub form_id: Option<i64>,
    /// When the inspection visit is scheduled.
    pub scheduled_at: Option<Date>,
    /// Free-form notes entered at creation or during work.
    pub inspection_notes: Option<String>,
    /// Opaque structured checklist payload (JSON text).
    pub checklist: Option<String>,
    /// Summary of monitoring findings.
    pub findings_summary: Option<String>,
    /// Monitoring's verdict, absent until monitoring completes.
    pub compliance_decision: Option<ComplianceDecision>,
    /// Violations found (required for a non-compliant verdict).
    pub violations_found: Option<String>,
    /// Compliance instructions / plan (written by NOV and NOO).
    pub compliance_plan: Option<String>,
    /// Compliance or payment deadline (written by NOV and NOO).
    pub compliance_deadline: Option<Date>,
    /// Documents attached to this form.
    pub documents: Vec<InspectionDocument>,
}

impl InspectionForm {
    /// Creates an empty form for a new inspection.
    #[must_use]
    pub const fn new(scheduled_at: Option<Date>, inspection_notes: Option<String>) -> Self {
        Self {
            form_id: None,
            scheduled_at,
            inspection_notes,
            checklist: None,
            findings_summary: None,
            compliance_decision: None,
            violations_found: None,
            compliance_plan: None,
            compliance_deadline: None,
            documents: Vec::new(),
        }
    }

    /// Returns whether `violations_found` carries non-blank content.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.violations_found
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use emb_inspect_domain::{ComplianceDecision, District, InspectionAction, Law};
use rust_decimal::Decimal;
use time::Date;

/// Request to create a new inspection.
///
/// Creation is separate from [`InspectionCommand`] because it has no
/// originating aggregate: it builds one. The district is resolved by the
/// caller from the first establishment's location; `None` means the
/// location was not in the lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInspection {
    /// The establishments under inspection. Must be non-empty.
    pub establishment_ids: Vec<i64>,
    /// The law the inspection is conducted under.
    pub law: Law,
    /// The derived district, if the location was known.
    pub district: Option<District>,
    /// Optional scheduled visit date.
    pub scheduled_at: Option<Date>,
    /// Optional creation notes.
    pub inspection_notes: Option<String>,
}

/// The payload of a Notice of Violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovPayload {
    /// Violations found, copied into the form's `violations_found`.
    pub violations: String,
    /// Corrective instructions, copied into the form's `compliance_plan`.
    pub compliance_instructions: String,
    /// Compliance deadline, copied into the form's `compliance_deadline`.
    pub compliance_deadline: Date,
    /// Whether the establishment must visit the office.
    pub required_office_visit: bool,
    /// Optional remarks recorded in history.
    pub remarks: Option<String>,
}

/// The payload of a Notice of Order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NooPayload {
    /// Monetary penalty. Recorded in the history remarks.
    pub penalty_fees: Decimal,
    /// Breakdown of violations, copied into the form's `compliance_plan`.
    pub violation_breakdown: String,
    /// Payment deadline, copied into the form's `compliance_deadline`.
    pub payment_deadline: Date,
}

/// A workflow command: user intent as data.
///
/// Commands are the only way to request a state change on an existing
/// inspection. Each carries exactly the payload its transition needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionCommand {
    /// Claim an empty (or own) assignment slot.
    AssignToMe,
    /// Begin work at the current stage.
    Start,
    /// Finish work at the current stage. At the Monitoring stage the
    /// decision is mandatory and a non-compliant decision requires
    /// violations.
    Complete {
        /// Monitoring's verdict. Ignored outside the Monitoring stage.
        decision: Option<ComplianceDecision>,
        /// Violations found, required for a non-compliant verdict.
        violations_found: Option<String>,
        /// Optional findings summary written to the form.
        findings_summary: Option<String>,
    },
    /// Hand the inspection to the next stage.
    Forward,
    /// Approve at the current review stage.
    Review,
    /// Send a non-compliant outcome to the Legal Unit.
    ForwardToLegal,
    /// Issue a Notice of Violation.
    SendNov(NovPayload),
    /// Issue a Notice of Order.
    SendNoo(NooPayload),
    /// Close the inspection.
    Close,
}

impl InspectionCommand {
    /// Returns the action verb this command invokes.
    #[must_use]
    pub const fn action(&self) -> InspectionAction {
        match self {
            Self::AssignToMe => InspectionAction::AssignToMe,
            Self::Start => InspectionAction::Start,
            Self::Complete { .. } => InspectionAction::Complete,
            Self::Forward => InspectionAction::Forward,
            Self::Review => InspectionAction::Review,
            Self::ForwardToLegal => InspectionAction::ForwardToLegal,
            Self::SendNov(_) => InspectionAction::SendNov,
            Self::SendNoo(_) => InspectionAction::SendNoo,
            Self::Close => InspectionAction::Close,
        }
    }
}

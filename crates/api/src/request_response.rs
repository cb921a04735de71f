// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Enumerated domain values cross this boundary as their stored
//! strings (`SECTION_CHIEF`, `CLOSED_COMPLIANT`, `PD-1586`, ...);
//! parsing back into domain types happens in the handlers.

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// API request to create a new inspection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateInspectionRequest {
    /// The establishments under inspection. Must be non-empty.
    pub establishments: Vec<i64>,
    /// The law code (e.g. `PD-1586`).
    pub law: String,
    /// Optional scheduled visit date.
    pub scheduled_at: Option<Date>,
    /// Optional creation notes.
    pub inspection_notes: Option<String>,
}

/// The body of a `POST /inspections/{id}/{action}` request.
///
/// Every field is optional at the contract level; each action verb
/// requires its own subset and rejects requests missing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActionPayload {
    /// Monitoring's compliance decision (`complete` only).
    pub decision: Option<String>,
    /// Violations found during monitoring (`complete` only).
    pub violations_found: Option<String>,
    /// Findings summary written to the form (`complete` only).
    pub findings_summary: Option<String>,
    /// Violations cited in a Notice of Violation (`send_nov`).
    pub violations: Option<String>,
    /// Corrective instructions (`send_nov`).
    pub compliance_instructions: Option<String>,
    /// Compliance deadline (`send_nov`).
    pub compliance_deadline: Option<Date>,
    /// Whether an office visit is required (`send_nov`).
    pub required_office_visit: Option<bool>,
    /// Free-form remarks recorded in history (`send_nov`).
    pub remarks: Option<String>,
    /// Monetary penalty (`send_noo`).
    pub penalty_fees: Option<Decimal>,
    /// Breakdown of violations (`send_noo`).
    pub violation_breakdown: Option<String>,
    /// Payment deadline (`send_noo`).
    pub payment_deadline: Option<Date>,
}

/// List-endpoint filters, combined with the actor's role/tab scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListInspectionsRequest {
    /// Role-specific tab (`received`, `my_inspections`, `forwarded`,
    /// `review`, `tracking`).
    pub tab: Option<String>,
    /// Simplified status filter.
    pub status: Option<String>,
    /// Restrict to inspections currently assigned to the actor.
    pub assigned_to_me: bool,
    /// Restrict to inspections created by the actor.
    pub created_by_me: bool,
}

/// A document attached to an inspection form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentInfo {
    /// Canonical identifier.
    pub document_id: i64,
    /// Stored file reference.
    pub file_ref: String,
    /// Type tag (e.g. `inspection_report`).
    pub doc_type: String,
    /// The uploading officer, if recorded.
    pub uploaded_by: Option<i64>,
    /// Upload timestamp.
    pub uploaded_at: OffsetDateTime,
}

/// The embedded inspection form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormInfo {
    /// Scheduled visit date.
    pub scheduled_at: Option<Date>,
    /// Creation notes.
    pub inspection_notes: Option<String>,
    /// Opaque structured checklist payload (JSON text).
    pub checklist: Option<String>,
    /// Findings summary.
    pub findings_summary: Option<String>,
    /// Compliance decision, once monitoring has ruled.
    pub compliance_decision: Option<String>,
    /// Violations found.
    pub violations_found: Option<String>,
    /// Compliance plan / corrective instructions.
    pub compliance_plan: Option<String>,
    /// Compliance or payment deadline.
    pub compliance_deadline: Option<Date>,
    /// Attached documents.
    pub documents: Vec<DocumentInfo>,
}

/// A full inspection aggregate scoped to the requesting officer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InspectionResponse {
    /// Canonical identifier.
    pub inspection_id: i64,
    /// Human-readable code, e.g. `EIA-2024-0001`.
    pub code: String,
    /// The law the inspection is conducted under.
    pub law: String,
    /// The derived district, if the location was known.
    pub district: Option<String>,
    /// Current workflow state.
    pub state: String,
    /// Coarse status label for list display.
    pub simplified_status: String,
    /// The officer owning the current state, if any.
    pub current_assignee: Option<i64>,
    /// The creating Division Chief.
    pub created_by: i64,
    /// The establishments covered.
    pub establishments: Vec<i64>,
    /// The embedded form.
    pub form: FormInfo,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last-modification timestamp.
    pub updated_at: OffsetDateTime,
    /// The action verbs the requesting officer may invoke right now.
    pub available_actions: Vec<String>,
}

/// A history entry for one inspection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntryInfo {
    /// The state before the transition. Absent on the creating entry.
    pub previous_state: Option<String>,
    /// The state after the transition.
    pub new_state: String,
    /// The officer who performed the action, if their account still
    /// exists.
    pub actor_id: Option<i64>,
    /// The actor's display name at the time of the action.
    pub actor_name: String,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// When the transition was performed.
    pub timestamp: OffsetDateTime,
}

/// An in-app notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    /// Canonical identifier.
    pub notification_id: i64,
    /// The notification category.
    pub kind: String,
    /// Short title for list display.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// The officer whose action produced it, if any.
    pub sender_id: Option<i64>,
    /// The inspection this notification refers to, if any.
    pub related_inspection: Option<i64>,
    /// Whether the recipient has read it.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

/// API request to create a new officer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOfficerRequest {
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The officer's role.
    pub role: String,
    /// The law section, required for section-scoped roles.
    pub law_section: Option<String>,
    /// The district, required for Monitoring Personnel.
    pub district: Option<String>,
}

/// API request to assign or clear an officer's district.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignDistrictRequest {
    /// The new district, or `None` to clear.
    pub district: Option<String>,
}

/// An officer as surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OfficerInfo {
    /// Canonical identifier.
    pub officer_id: i64,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The officer's role.
    pub role: String,
    /// The law section this officer covers, if any.
    pub law_section: Option<String>,
    /// The district this officer covers, if any.
    pub district: Option<String>,
    /// Whether the officer currently holds their role slot.
    pub active: bool,
}

/// API request to register an establishment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEstablishmentRequest {
    /// Establishment name.
    pub name: String,
    /// Province of the establishment's location.
    pub province: String,
    /// City or municipality of the establishment's location.
    pub city: String,
    /// Contact address for legal notices.
    pub contact_email: Option<String>,
}

/// An establishment as surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EstablishmentInfo {
    /// Canonical identifier.
    pub establishment_id: i64,
    /// Establishment name.
    pub name: String,
    /// Province of the establishment's location.
    pub province: String,
    /// City or municipality of the establishment's location.
    pub city: String,
    /// Contact address for legal notices.
    pub contact_email: Option<String>,
    /// The district derived from the location, if known.
    pub district: Option<String>,
}

/// A reinspection obligation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReinspectionInfo {
    /// Canonical identifier.
    pub obligation_id: i64,
    /// The establishment owing a reinspection.
    pub establishment_id: i64,
    /// The closed inspection this obligation derives from.
    pub inspection_id: Option<i64>,
    /// The compliance outcome of the originating closure.
    pub outcome: String,
    /// When the reinspection falls due.
    pub due_date: Date,
    /// Whether the obligation is still outstanding.
    pub status: String,
    /// Whether a reminder has been sent.
    pub reminder_sent: bool,
}

/// API request to forcibly set an inspection's state (Admin only).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverrideStateRequest {
    /// The state to set.
    pub new_state: String,
    /// The officer to assign, or `None` to clear the slot.
    pub assignee: Option<i64>,
    /// The reason, recorded in history.
    pub reason: String,
}

/// API request to attach a document to an inspection form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddDocumentRequest {
    /// Stored file reference.
    pub file_ref: String,
    /// Type tag.
    pub doc_type: String,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and the text encodings for dates and enums.
//!
//! Enum-like domain types are stored as their canonical marker strings,
//! dates as `YYYY-MM-DD`, and timestamps as RFC 3339. Decoding failures
//! surface as [`PersistenceError::CorruptRow`].

use std::str::FromStr;

use diesel::prelude::*;
use emb_inspect_domain::{
    ComplianceDecision, District, Establishment, InspectionDocument, InspectionForm,
    InspectionState, Law, LawSection, ObligationStatus, Officer, ReinspectionObligation, Role,
};
use emb_inspect_events::{HistoryEntry, Notification, NotificationKind};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{
    establishments, inspection_documents, inspection_forms, inspection_history, inspections,
    notifications, officers, reinspection_obligations,
};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) fn encode_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub(crate) fn decode_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, DATE_FORMAT).map_err(|e| {
        PersistenceError::CorruptRow(format!("Invalid stored date '{text}': {e}"))
    })
}

pub(crate) fn encode_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.format(&Rfc3339)
        .map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub(crate) fn decode_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339).map_err(|e| {
        PersistenceError::CorruptRow(format!("Invalid stored timestamp '{text}': {e}"))
    })
}

/// Diesel Queryable struct for officer rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = officers)]
pub struct OfficerRow {
    pub officer_id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub law_section: Option<String>,
    pub district: Option<String>,
    pub active: i32,
}

impl OfficerRow {
    pub fn into_domain(self) -> Result<Officer, PersistenceError> {
        let role: Role = Role::from_str(&self.role)?;
        let law_section: Option<LawSection> = self
            .law_section
            .as_deref()
            .map(LawSection::parse)
            .transpose()?;
        Ok(Officer::with_id(
            self.officer_id,
            self.email,
            self.name,
            role,
            law_section,
            self.district.as_deref().map(District::new),
            self.active != 0,
        ))
    }
}

/// Diesel Queryable struct for establishment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = establishments)]
pub struct EstablishmentRow {
    pub establishment_id: i64,
    pub name: String,
    pub province: String,
    pub city: String,
    pub contact_email: Option<String>,
}

impl EstablishmentRow {
    pub fn into_domain(self) -> Establishment {
        Establishment {
            establishment_id: Some(self.establishment_id),
            name: self.name,
            province: self.province,
            city: self.city,
            contact_email: self.contact_email,
        }
    }
}

/// Diesel Queryable struct for inspection rows (aggregate head only).
#[derive(Queryable, Selectable)]
#[diesel(table_name = inspections)]
pub struct InspectionRow {
    pub inspection_id: i64,
    pub code: String,
    pub law: String,
    pub district: Option<String>,
    pub current_state: String,
    pub current_assignee: Option<i64>,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Diesel Queryable struct for inspection form rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = inspection_forms)]
pub struct FormRow {
    pub form_id: i64,
    pub inspection_id: i64,
    pub scheduled_at: Option<String>,
    pub inspection_notes: Option<String>,
    pub checklist: Option<String>,
    pub findings_summary: Option<String>,
    pub compliance_decision: Option<String>,
    pub violations_found: Option<String>,
    pub compliance_plan: Option<String>,
    pub compliance_deadline: Option<String>,
}

impl FormRow {
    pub fn into_domain(
        self,
        documents: Vec<InspectionDocument>,
    ) -> Result<InspectionForm, PersistenceError> {
        Ok(InspectionForm {
            form_id: Some(self.form_id),
            scheduled_at: self.scheduled_at.as_deref().map(decode_date).transpose()?,
            inspection_notes: self.inspection_notes,
            checklist: self.checklist,
            findings_summary: self.findings_summary,
            compliance_decision: self
                .compliance_decision
                .as_deref()
                .map(ComplianceDecision::from_str)
                .transpose()?,
            violations_found: self.violations_found,
            compliance_plan: self.compliance_plan,
            compliance_deadline: self
                .compliance_deadline
                .as_deref()
                .map(decode_date)
                .transpose()?,
            documents,
        })
    }
}

/// Diesel Queryable struct for document rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = inspection_documents)]
pub struct DocumentRow {
    pub document_id: i64,
    pub inspection_id: i64,
    pub file_ref: String,
    pub doc_type: String,
    pub uploaded_by: Option<i64>,
    pub uploaded_at: String,
}

impl DocumentRow {
    pub fn into_domain(self) -> Result<InspectionDocument, PersistenceError> {
        Ok(InspectionDocument {
            document_id: Some(self.document_id),
            file_ref: self.file_ref,
            doc_type: self.doc_type,
            uploaded_by: self.uploaded_by,
            uploaded_at: decode_timestamp(&self.uploaded_at)?,
        })
    }
}

/// Diesel Queryable struct for history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = inspection_history)]
pub struct HistoryRow {
    pub history_id: i64,
    pub inspection_id: i64,
    pub previous_state: Option<String>,
    pub new_state: String,
    pub actor_id: Option<i64>,
    pub actor_name: String,
    pub remarks: Option<String>,
    pub occurred_at: String,
}

impl HistoryRow {
    pub fn into_domain(self) -> Result<HistoryEntry, PersistenceError> {
        Ok(HistoryEntry {
            previous_state: self
                .previous_state
                .as_deref()
                .map(InspectionState::from_str)
                .transpose()?,
            new_state: InspectionState::from_str(&self.new_state)?,
            actor_id: self.actor_id,
            actor_name: self.actor_name,
            remarks: self.remarks,
            timestamp: decode_timestamp(&self.occurred_at)?,
        })
    }
}

/// A stored notification together with its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub notification_id: i64,
    pub read: bool,
    pub notification: Notification,
}

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub struct NotificationRow {
    pub notification_id: i64,
    pub recipient_id: Option<i64>,
    pub sender_id: Option<i64>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_inspection: Option<i64>,
    pub read: i32,
    pub created_at: String,
}

impl NotificationRow {
    pub fn into_domain(self) -> Result<NotificationRecord, PersistenceError> {
        let kind: NotificationKind = NotificationKind::parse(&self.kind).ok_or_else(|| {
            PersistenceError::CorruptRow(format!("Invalid notification kind '{}'", self.kind))
        })?;
        let read: bool = self.read != 0;
        Ok(NotificationRecord {
            notification_id: self.notification_id,
            read,
            notification: Notification {
                // All notification queries filter by recipient, so a row
                // whose recipient was removed is never loaded.
                recipient_id: self.recipient_id.unwrap_or_default(),
                sender_id: self.sender_id,
                kind,
                title: self.title,
                message: self.message,
                related_inspection: self.related_inspection,
                read,
                created_at: decode_timestamp(&self.created_at)?,
            },
        })
    }
}

/// Diesel Queryable struct for reinspection obligation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reinspection_obligations)]
pub struct ObligationRow {
    pub obligation_id: i64,
    pub establishment_id: i64,
    pub inspection_id: Option<i64>,
    pub outcome: String,
    pub due_date: String,
    pub status: String,
    pub reminder_sent: i32,
}

impl ObligationRow {
    pub fn into_domain(self) -> Result<ReinspectionObligation, PersistenceError> {
        Ok(ReinspectionObligation {
            obligation_id: Some(self.obligation_id),
            establishment_id: self.establishment_id,
            inspection_id: self.inspection_id,
            outcome: ComplianceDecision::from_str(&self.outcome)?,
            due_date: decode_date(&self.due_date)?,
            status: ObligationStatus::from_str(&self.status)?,
            reminder_sent: self.reminder_sent != 0,
        })
    }
}

pub(crate) fn law_to_text(law: Law) -> &'static str {
    law.code()
}

pub(crate) fn law_from_text(text: &str) -> Result<Law, PersistenceError> {
    Ok(Law::parse(text)?)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler authenticates the acting officer first, then follows
//! the same cycle: load snapshots, call the engine, persist atomically,
//! build the response DTO. Outbound emails are returned to the caller
//! for best-effort dispatch after the transaction has committed.

use std::str::FromStr;

use emb_inspect::{
    ActionOutcome, CreateInspection, CreationOutcome, InspectionCommand, NooPayload, NovPayload,
    OfficerRegistry, apply_action, available_actions,
};
use emb_inspect_domain::{
    ComplianceDecision, District, DistrictTable, Establishment, Inspection, InspectionAction,
    InspectionDocument, InspectionForm, InspectionState, Law, LawSection, Officer, Role,
    validate_officer_fields, validate_role_slot,
};
use emb_inspect_events::{EmailMessage, HistoryEntry, Notification, NotificationKind};
use emb_inspect_persistence::{
    InspectionListFilter, ObligationListFilter, OfficerListFilter, SqlitePersistence,
};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::{authenticate_officer, require_one_of, require_role};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ActionPayload, AddDocumentRequest, AssignDistrictRequest, CreateEstablishmentRequest,
    CreateInspectionRequest, CreateOfficerRequest, DocumentInfo, EstablishmentInfo, FormInfo,
    HistoryEntryInfo, InspectionResponse, ListInspectionsRequest, NotificationInfo, OfficerInfo,
    OverrideStateRequest, ReinspectionInfo,
};

fn load_registry(persistence: &mut SqlitePersistence) -> Result<OfficerRegistry, ApiError> {
    let officers: Vec<Officer> = persistence
        .load_active_officers()
        .map_err(translate_persistence_error)?;
    Ok(OfficerRegistry::new(officers))
}

fn form_info(form: &InspectionForm) -> FormInfo {
    FormInfo {
        scheduled_at: form.scheduled_at,
        inspection_notes: form.inspection_notes.clone(),
        checklist: form.checklist.clone(),
        findings_summary: form.findings_summary.clone(),
        compliance_decision: form
            .compliance_decision
            .map(|d| d.as_str().to_string()),
        violations_found: form.violations_found.clone(),
        compliance_plan: form.compliance_plan.clone(),
        compliance_deadline: form.compliance_deadline,
        documents: form
            .documents
            .iter()
            .map(|d| DocumentInfo {
                document_id: d.document_id.unwrap_or_default(),
                file_ref: d.file_ref.clone(),
                doc_type: d.doc_type.clone(),
                uploaded_by: d.uploaded_by,
                uploaded_at: d.uploaded_at,
            })
            .collect(),
    }
}

/// Builds the aggregate DTO, with `available_actions` scoped to the
/// viewing officer.
fn inspection_response(
    inspection: &Inspection,
    viewer: &Officer,
) -> Result<InspectionResponse, ApiError> {
    let inspection_id: i64 = inspection.inspection_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Loaded inspection carries no id"),
    })?;
    let code: String = inspection
        .code
        .as_ref()
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Loaded inspection carries no code"),
        })?;
    let actions: Vec<String> = available_actions(inspection, viewer)
        .iter()
        .map(|a| a.verb().to_string())
        .collect();

    Ok(InspectionResponse {
        inspection_id,
        code,
        law: inspection.law.code().to_string(),
        district: inspection.district.as_ref().map(ToString::to_string),
        state: inspection.current_state.as_str().to_string(),
        simplified_status: inspection
            .current_state
            .simplified_status()
            .as_str()
            .to_string(),
        current_assignee: inspection.current_assignee,
        created_by: inspection.created_by,
        establishments: inspection.establishment_ids.clone(),
        form: form_info(&inspection.form),
        created_at: inspection.created_at,
        updated_at: inspection.updated_at,
        available_actions: actions,
    })
}

fn officer_info(officer: &Officer) -> OfficerInfo {
    OfficerInfo {
        officer_id: officer.officer_id.unwrap_or_default(),
        email: officer.email.clone(),
        name: officer.name.clone(),
        role: officer.role.as_str().to_string(),
        law_section: officer.law_section.map(|s| s.as_str().to_string()),
        district: officer.district.as_ref().map(ToString::to_string),
        active: officer.active,
    }
}

fn require_field<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::Validation {
        field: field.to_string(),
        message: format!("'{field}' is required for this action"),
    })
}

/// Translates an action verb plus its payload into an engine command.
///
/// # Errors
///
/// Returns `Validation` when the payload misses a field the verb
/// requires, or carries an unparseable value.
pub fn build_command(
    action: InspectionAction,
    payload: ActionPayload,
) -> Result<InspectionCommand, ApiError> {
    match action {
        InspectionAction::AssignToMe => Ok(InspectionCommand::AssignToMe),
        InspectionAction::Start => Ok(InspectionCommand::Start),
        InspectionAction::Forward => Ok(InspectionCommand::Forward),
        InspectionAction::Review => Ok(InspectionCommand::Review),
        InspectionAction::ForwardToLegal => Ok(InspectionCommand::ForwardToLegal),
        InspectionAction::Close => Ok(InspectionCommand::Close),
        InspectionAction::Complete => {
            let decision: Option<ComplianceDecision> = payload
                .decision
                .as_deref()
                .map(ComplianceDecision::from_str)
                .transpose()
                .map_err(translate_domain_error)?;
            Ok(InspectionCommand::Complete {
                decision,
                violations_found: payload.violations_found,
                findings_summary: payload.findings_summary,
            })
        }
        InspectionAction::SendNov => Ok(InspectionCommand::SendNov(NovPayload {
            violations: require_field(payload.violations, "violations")?,
            compliance_instructions: require_field(
                payload.compliance_instructions,
                "compliance_instructions",
            )?,
            compliance_deadline: require_field(payload.compliance_deadline, "compliance_deadline")?,
            required_office_visit: payload.required_office_visit.unwrap_or(false),
            remarks: payload.remarks,
        })),
        InspectionAction::SendNoo => Ok(InspectionCommand::SendNoo(NooPayload {
            penalty_fees: require_field(payload.penalty_fees, "penalty_fees")?,
            violation_breakdown: require_field(payload.violation_breakdown, "violation_breakdown")?,
            payment_deadline: require_field(payload.payment_deadline, "payment_deadline")?,
        })),
    }
}

/// Creates a new inspection.
///
/// The actor must be the active Division Chief. The district is derived
/// from the first establishment's location; the inspection lands in
/// `SECTION_ASSIGNED` with the resolved Section Chief as assignee.
///
/// # Errors
///
/// Returns `PermissionDenied` for non-chief actors, `Validation` for an
/// unknown law or empty establishment set, `NotFound` for a missing
/// establishment, and `NoAssigneeFound` when no Section Chief covers
/// the law.
pub fn create_inspection(
    persistence: &mut SqlitePersistence,
    request: CreateInspectionRequest,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<InspectionResponse, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    let law: Law = Law::parse(&request.law).map_err(translate_domain_error)?;

    let mut establishments: Vec<Establishment> = Vec::with_capacity(request.establishments.len());
    for &establishment_id in &request.establishments {
        establishments.push(
            persistence
                .get_establishment(establishment_id)
                .map_err(translate_persistence_error)?,
        );
    }
    let district: Option<District> = establishments
        .first()
        .and_then(|e| DistrictTable::builtin().lookup(&e.province, &e.city));

    let registry: OfficerRegistry = load_registry(persistence)?;
    let outcome: CreationOutcome = emb_inspect::create_inspection(
        &registry,
        CreateInspection {
            establishment_ids: request.establishments,
            law,
            district,
            scheduled_at: request.scheduled_at,
            inspection_notes: request.inspection_notes,
        },
        &actor,
        now,
    )
    .map_err(translate_core_error)?;

    let (inspection_id, code) = persistence
        .persist_creation(&outcome)
        .map_err(translate_persistence_error)?;
    info!(inspection_id, code = code.value(), "Inspection created");

    let created: Inspection = persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    inspection_response(&created, &actor)
}

fn notice_emails(
    persistence: &mut SqlitePersistence,
    inspection: &Inspection,
    action: InspectionAction,
) -> Result<Vec<EmailMessage>, ApiError> {
    let inspection_id: i64 = inspection.inspection_id.unwrap_or_default();
    let code: String = inspection
        .code
        .as_ref()
        .map_or_else(|| inspection.law.code().to_string(), ToString::to_string);
    let (subject, intro): (String, &str) = if action == InspectionAction::SendNov {
        (
            format!("Notice of Violation for inspection {code}"),
            "A Notice of Violation has been issued against your establishment.",
        )
    } else {
        (
            format!("Notice of Order for inspection {code}"),
            "A Notice of Order has been issued against your establishment.",
        )
    };
    let deadline: String = inspection
        .form
        .compliance_deadline
        .map_or_else(|| String::from("as instructed"), |d| d.to_string());

    let contacts: Vec<(i64, String)> = persistence
        .contacts_for_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    Ok(contacts
        .into_iter()
        .map(|(_, email)| {
            EmailMessage::new(
                email,
                subject.clone(),
                format!("{intro} Compliance is due by {deadline}."),
            )
        })
        .collect())
}

/// Performs a workflow action on an inspection.
///
/// Returns the refreshed aggregate plus the emails to dispatch after
/// commit. Notice actions additionally email every establishment
/// contact on record.
///
/// # Errors
///
/// Surfaces the engine's error taxonomy; see [`ApiError`].
pub fn perform_inspection_action(
    persistence: &mut SqlitePersistence,
    inspection_id: i64,
    verb: &str,
    payload: ActionPayload,
    actor_id: i64,
    today: Date,
    now: OffsetDateTime,
) -> Result<(InspectionResponse, Vec<EmailMessage>), ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    let action: InspectionAction =
        InspectionAction::from_str(verb).map_err(translate_domain_error)?;
    let command: InspectionCommand = build_command(action, payload)?;

    let inspection: Inspection = persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    let registry: OfficerRegistry = load_registry(persistence)?;

    let outcome: ActionOutcome = apply_action(&registry, &inspection, &command, &actor, today, now)
        .map_err(translate_core_error)?;
    persistence
        .apply_transition(inspection_id, &outcome, now)
        .map_err(translate_persistence_error)?;

    let mut emails: Vec<EmailMessage> = outcome
        .steps
        .iter()
        .flat_map(|step| step.emails.iter().cloned())
        .collect();

    let refreshed: Inspection = persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    if matches!(
        action,
        InspectionAction::SendNov | InspectionAction::SendNoo
    ) {
        emails.extend(notice_emails(persistence, &refreshed, action)?);
    }

    let response: InspectionResponse = inspection_response(&refreshed, &actor)?;
    Ok((response, emails))
}

/// Retrieves one inspection, scoped to the requesting officer.
///
/// # Errors
///
/// Returns `NotFound` when the inspection does not exist.
pub fn get_inspection(
    persistence: &mut SqlitePersistence,
    inspection_id: i64,
    actor_id: i64,
) -> Result<InspectionResponse, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    let inspection: Inspection = persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    inspection_response(&inspection, &actor)
}

fn listed(
    persistence: &mut SqlitePersistence,
    filter: &InspectionListFilter,
) -> Result<Vec<Inspection>, ApiError> {
    persistence
        .list_inspections(filter)
        .map_err(translate_persistence_error)
}

fn assigned_filter(states: Vec<InspectionState>, assignee: i64) -> InspectionListFilter {
    InspectionListFilter {
        states,
        assignee: Some(assignee),
        ..InspectionListFilter::default()
    }
}

fn state_filter(states: Vec<InspectionState>) -> InspectionListFilter {
    InspectionListFilter {
        states,
        ..InspectionListFilter::default()
    }
}

/// Lists inspections visible to the actor under the requested tab.
///
/// Tab meanings are role-specific: working roles see their queue
/// (`received`), their active work (`my_inspections`), anything they
/// handed downstream for their laws (`forwarded`), and their review
/// queue (`review`); the Division Chief's `tracking` tab covers
/// everything they created plus everything awaiting their review.
/// Without a tab, Monitoring Personnel and the Legal Unit see their
/// standing queues, and everyone else sees all inspections subject to
/// the flag filters.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_inspections(
    persistence: &mut SqlitePersistence,
    request: ListInspectionsRequest,
    actor_id: i64,
) -> Result<Vec<InspectionResponse>, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    let tab: Option<&str> = request.tab.as_deref();

    let mut rows: Vec<Inspection> = match (actor.role, tab) {
        (Role::SectionChief, Some("received")) => listed(
            persistence,
            &assigned_filter(vec![InspectionState::SectionAssigned], actor_id),
        )?,
        (Role::SectionChief, Some("my_inspections")) => listed(
            persistence,
            &assigned_filter(
                vec![
                    InspectionState::SectionInProgress,
                    InspectionState::SectionCompleted,
                ],
                actor_id,
            ),
        )?,
        (Role::SectionChief, Some("forwarded")) => {
            let mut downstream: Vec<Inspection> = listed(
                persistence,
                &state_filter(vec![
                    InspectionState::UnitAssigned,
                    InspectionState::UnitInProgress,
                    InspectionState::UnitCompleted,
                    InspectionState::MonitoringAssigned,
                    InspectionState::MonitoringInProgress,
                ]),
            )?;
            downstream.retain(|i| actor.law_section.is_some_and(|s| s.covers(i.law)));
            downstream
        }
        (Role::SectionChief, Some("review")) => listed(
            persistence,
            &assigned_filter(vec![InspectionState::SectionReviewed], actor_id),
        )?,
        (Role::UnitHead, Some("received")) => listed(
            persistence,
            &assigned_filter(vec![InspectionState::UnitAssigned], actor_id),
        )?,
        (Role::UnitHead, Some("my_inspections")) => listed(
            persistence,
            &assigned_filter(
                vec![
                    InspectionState::UnitInProgress,
                    InspectionState::UnitCompleted,
                ],
                actor_id,
            ),
        )?,
        (Role::UnitHead, Some("forwarded")) => {
            let mut downstream: Vec<Inspection> = listed(
                persistence,
                &state_filter(vec![
                    InspectionState::MonitoringAssigned,
                    InspectionState::MonitoringInProgress,
                ]),
            )?;
            downstream.retain(|i| actor.law_section.is_some_and(|s| s.covers(i.law)));
            downstream
        }
        (Role::UnitHead, Some("review")) => listed(
            persistence,
            &assigned_filter(vec![InspectionState::UnitReviewed], actor_id),
        )?,
        (Role::MonitoringPersonnel, _) => listed(
            persistence,
            &assigned_filter(
                vec![
                    InspectionState::MonitoringAssigned,
                    InspectionState::MonitoringInProgress,
                ],
                actor_id,
            ),
        )?,
        (Role::LegalUnit, _) => listed(
            persistence,
            &state_filter(vec![
                InspectionState::LegalReviewNonCompliant,
                InspectionState::NovSent,
                InspectionState::NooSent,
            ]),
        )?,
        (Role::DivisionChief, Some("tracking")) => {
            let mut merged: Vec<Inspection> = listed(
                persistence,
                &InspectionListFilter {
                    created_by: Some(actor_id),
                    ..InspectionListFilter::default()
                },
            )?;
            let reviewed: Vec<Inspection> = listed(
                persistence,
                &state_filter(vec![InspectionState::DivisionReviewed]),
            )?;
            for inspection in reviewed {
                if !merged
                    .iter()
                    .any(|m| m.inspection_id == inspection.inspection_id)
                {
                    merged.push(inspection);
                }
            }
            merged.sort_by(|a, b| b.inspection_id.cmp(&a.inspection_id));
            merged
        }
        _ => listed(persistence, &InspectionListFilter::default())?,
    };

    if request.assigned_to_me {
        rows.retain(|i| i.current_assignee == Some(actor_id));
    }
    if request.created_by_me {
        rows.retain(|i| i.created_by == actor_id);
    }
    if let Some(status) = request.status.as_deref() {
        rows.retain(|i| i.current_state.simplified_status().as_str() == status);
    }

    rows.iter()
        .map(|inspection| inspection_response(inspection, &actor))
        .collect()
}

/// Retrieves an inspection's history, newest first.
///
/// # Errors
///
/// Returns `NotFound` when the inspection does not exist.
pub fn get_history(
    persistence: &mut SqlitePersistence,
    inspection_id: i64,
    actor_id: i64,
) -> Result<Vec<HistoryEntryInfo>, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    let history: Vec<HistoryEntry> = persistence
        .history_for(inspection_id)
        .map_err(translate_persistence_error)?;

    Ok(history
        .into_iter()
        .map(|entry| HistoryEntryInfo {
            previous_state: entry.previous_state.map(|s| s.as_str().to_string()),
            new_state: entry.new_state.as_str().to_string(),
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            remarks: entry.remarks,
            timestamp: entry.timestamp,
        })
        .collect())
}

/// Attaches an uploaded document to an inspection's form.
///
/// # Errors
///
/// Returns `NotFound` when the inspection does not exist.
pub fn add_document(
    persistence: &mut SqlitePersistence,
    inspection_id: i64,
    request: AddDocumentRequest,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<DocumentInfo, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;

    let document: InspectionDocument = InspectionDocument {
        document_id: None,
        file_ref: request.file_ref,
        doc_type: request.doc_type,
        uploaded_by: Some(actor_id),
        uploaded_at: now,
    };
    let document_id: i64 = persistence
        .add_document(inspection_id, &document)
        .map_err(translate_persistence_error)?;

    Ok(DocumentInfo {
        document_id,
        file_ref: document.file_ref,
        doc_type: document.doc_type,
        uploaded_by: document.uploaded_by,
        uploaded_at: document.uploaded_at,
    })
}

/// Lists the actor's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notifications(
    persistence: &mut SqlitePersistence,
    actor_id: i64,
    unread_only: bool,
) -> Result<Vec<NotificationInfo>, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    let records = persistence
        .notifications_for(actor_id, unread_only)
        .map_err(translate_persistence_error)?;

    Ok(records
        .into_iter()
        .map(|record| NotificationInfo {
            notification_id: record.notification_id,
            kind: record.notification.kind.as_str().to_string(),
            title: record.notification.title,
            message: record.notification.message,
            sender_id: record.notification.sender_id,
            related_inspection: record.notification.related_inspection,
            read: record.read,
            created_at: record.notification.created_at,
        })
        .collect())
}

/// Marks one of the actor's notifications as read.
///
/// # Errors
///
/// Returns `NotFound` when the notification does not exist or belongs
/// to a different officer.
pub fn mark_notification_read(
    persistence: &mut SqlitePersistence,
    notification_id: i64,
    actor_id: i64,
) -> Result<(), ApiError> {
    authenticate_officer(persistence, actor_id)?;
    let owned = persistence
        .notifications_for(actor_id, false)
        .map_err(translate_persistence_error)?;
    if !owned.iter().any(|r| r.notification_id == notification_id) {
        return Err(ApiError::NotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {notification_id} does not exist"),
        });
    }
    persistence
        .mark_notification_read(notification_id)
        .map_err(translate_persistence_error)
}

/// Creates a new officer, active immediately.
///
/// Admin only. The role-slot cardinality invariants are enforced
/// against the currently active roster before the insert; the partial
/// unique indexes in the database backstop the same rules.
///
/// # Errors
///
/// Returns `RoleSlotOccupied` when another active officer holds the
/// slot, and `Validation` for field-level problems including a
/// duplicate email.
pub fn create_officer(
    persistence: &mut SqlitePersistence,
    request: CreateOfficerRequest,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<OfficerInfo, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    require_role(&actor, Role::Admin)?;

    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;
    let law_section: Option<LawSection> = request
        .law_section
        .as_deref()
        .map(LawSection::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let district: Option<District> = request.district.as_deref().map(District::new);

    let candidate: Officer = Officer::new(
        request.email,
        request.name,
        role,
        law_section,
        district,
        true,
    );
    validate_officer_fields(&candidate).map_err(translate_domain_error)?;

    if persistence
        .get_officer_by_email(&candidate.email)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::Validation {
            field: String::from("email"),
            message: format!("Email '{}' is already in use", candidate.email),
        });
    }

    let active: Vec<Officer> = persistence
        .load_active_officers()
        .map_err(translate_persistence_error)?;
    validate_role_slot(&candidate, &active).map_err(translate_domain_error)?;

    let officer_id: i64 = persistence
        .create_officer(&candidate)
        .map_err(translate_persistence_error)?;
    info!(officer_id, role = candidate.role.as_str(), "Officer created");

    for admin in active.iter().filter(|o| o.role == Role::Admin) {
        if let Some(recipient_id) = admin.officer_id {
            if recipient_id == actor_id {
                continue;
            }
            persistence
                .insert_notification(&Notification::new(
                    recipient_id,
                    Some(actor_id),
                    NotificationKind::NewUser,
                    String::from("New officer registered"),
                    format!(
                        "{} ({}) was added as {}",
                        candidate.name,
                        candidate.email,
                        candidate.role.as_str()
                    ),
                    None,
                    now,
                ))
                .map_err(translate_persistence_error)?;
        }
    }

    let created: Officer = persistence
        .get_officer(officer_id)
        .map_err(translate_persistence_error)?;
    Ok(officer_info(&created))
}

/// Re-activates a deactivated officer.
///
/// Admin only. Activation re-checks the role-slot invariants: the slot
/// may have been filled while the officer was inactive.
///
/// # Errors
///
/// Returns `RoleSlotOccupied` when the slot is taken, `NotFound` when
/// the officer does not exist.
pub fn activate_officer(
    persistence: &mut SqlitePersistence,
    officer_id: i64,
    actor_id: i64,
) -> Result<OfficerInfo, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    require_role(&actor, Role::Admin)?;

    let mut candidate: Officer = persistence
        .get_officer(officer_id)
        .map_err(translate_persistence_error)?;
    candidate.active = true;

    let active: Vec<Officer> = persistence
        .load_active_officers()
        .map_err(translate_persistence_error)?;
    validate_role_slot(&candidate, &active).map_err(translate_domain_error)?;

    persistence
        .set_officer_active(officer_id, true)
        .map_err(translate_persistence_error)?;
    Ok(officer_info(&candidate))
}

/// Deactivates an officer. Admin only.
///
/// History entries keep their reference to the deactivated officer.
///
/// # Errors
///
/// Returns `NotFound` when the officer does not exist.
pub fn deactivate_officer(
    persistence: &mut SqlitePersistence,
    officer_id: i64,
    actor_id: i64,
) -> Result<OfficerInfo, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    require_role(&actor, Role::Admin)?;

    persistence
        .set_officer_active(officer_id, false)
        .map_err(translate_persistence_error)?;
    let updated: Officer = persistence
        .get_officer(officer_id)
        .map_err(translate_persistence_error)?;
    Ok(officer_info(&updated))
}

/// Assigns or clears an officer's district.
///
/// Open to Admins, Section Chiefs, and Unit Heads. For an active
/// officer the role-slot invariants are re-checked under the new scope.
///
/// # Errors
///
/// Returns `RoleSlotOccupied` when the re-scoped slot is taken,
/// `NotFound` when the officer does not exist.
pub fn assign_district(
    persistence: &mut SqlitePersistence,
    officer_id: i64,
    request: AssignDistrictRequest,
    actor_id: i64,
) -> Result<OfficerInfo, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    require_one_of(&actor, &[Role::Admin, Role::SectionChief, Role::UnitHead])?;

    let mut candidate: Officer = persistence
        .get_officer(officer_id)
        .map_err(translate_persistence_error)?;
    candidate.district = request.district.as_deref().map(District::new);

    if candidate.active {
        let active: Vec<Officer> = persistence
            .load_active_officers()
            .map_err(translate_persistence_error)?;
        validate_role_slot(&candidate, &active).map_err(translate_domain_error)?;
    }

    persistence
        .update_officer(officer_id, &candidate)
        .map_err(translate_persistence_error)?;
    Ok(officer_info(&candidate))
}

/// Lists officers, optionally filtered.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_officers(
    persistence: &mut SqlitePersistence,
    filter: &OfficerListFilter,
    actor_id: i64,
) -> Result<Vec<OfficerInfo>, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    let officers: Vec<Officer> = persistence
        .list_officers(filter)
        .map_err(translate_persistence_error)?;
    Ok(officers.iter().map(officer_info).collect())
}

/// Registers an establishment.
///
/// # Errors
///
/// Returns `Validation` for an empty name.
pub fn create_establishment(
    persistence: &mut SqlitePersistence,
    request: CreateEstablishmentRequest,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<EstablishmentInfo, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation {
            field: String::from("name"),
            message: String::from("Establishment name must not be empty"),
        });
    }

    let establishment: Establishment = Establishment {
        establishment_id: None,
        name: request.name,
        province: request.province,
        city: request.city,
        contact_email: request.contact_email,
    };
    let establishment_id: i64 = persistence
        .create_establishment(&establishment)
        .map_err(translate_persistence_error)?;

    let registry: OfficerRegistry = load_registry(persistence)?;
    for chief in registry.with_role(Role::DivisionChief) {
        if let Some(recipient_id) = chief.officer_id {
            if recipient_id == actor_id {
                continue;
            }
            persistence
                .insert_notification(&Notification::new(
                    recipient_id,
                    Some(actor_id),
                    NotificationKind::NewEstablishment,
                    String::from("New establishment registered"),
                    format!(
                        "{} ({}, {}) is now available for inspection",
                        establishment.name, establishment.city, establishment.province
                    ),
                    None,
                    now,
                ))
                .map_err(translate_persistence_error)?;
        }
    }

    let district: Option<District> =
        DistrictTable::builtin().lookup(&establishment.province, &establishment.city);
    Ok(EstablishmentInfo {
        establishment_id,
        name: establishment.name,
        province: establishment.province,
        city: establishment.city,
        contact_email: establishment.contact_email,
        district: district.as_ref().map(ToString::to_string),
    })
}

/// Lists registered establishments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_establishments(
    persistence: &mut SqlitePersistence,
    actor_id: i64,
) -> Result<Vec<EstablishmentInfo>, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    let establishments: Vec<Establishment> = persistence
        .list_establishments()
        .map_err(translate_persistence_error)?;
    let table: DistrictTable = DistrictTable::builtin();

    Ok(establishments
        .into_iter()
        .map(|e| {
            let district: Option<District> = table.lookup(&e.province, &e.city);
            EstablishmentInfo {
                establishment_id: e.establishment_id.unwrap_or_default(),
                name: e.name,
                province: e.province,
                city: e.city,
                contact_email: e.contact_email,
                district: district.as_ref().map(ToString::to_string),
            }
        })
        .collect())
}

/// Lists reinspection obligations, soonest due first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_reinspections(
    persistence: &mut SqlitePersistence,
    filter: &ObligationListFilter,
    actor_id: i64,
) -> Result<Vec<ReinspectionInfo>, ApiError> {
    authenticate_officer(persistence, actor_id)?;
    let obligations = persistence
        .list_obligations(filter)
        .map_err(translate_persistence_error)?;

    Ok(obligations
        .into_iter()
        .map(|o| ReinspectionInfo {
            obligation_id: o.obligation_id.unwrap_or_default(),
            establishment_id: o.establishment_id,
            inspection_id: o.inspection_id,
            outcome: o.outcome.as_str().to_string(),
            due_date: o.due_date,
            status: o.status.as_str().to_string(),
            reminder_sent: o.reminder_sent,
        })
        .collect())
}

/// Builds reminder emails for pending obligations due on or before
/// `today` that have not been reminded yet, marking each as reminded.
///
/// The emails are returned for best-effort dispatch after commit; a
/// failed send is not retried.
///
/// # Errors
///
/// Returns an error if a query or update fails.
pub fn collect_due_reminders(
    persistence: &mut SqlitePersistence,
    today: Date,
) -> Result<Vec<EmailMessage>, ApiError> {
    let due = persistence
        .list_obligations(&ObligationListFilter {
            due_on_or_before: Some(today),
            pending_only: true,
            reminder_not_sent: true,
            ..ObligationListFilter::default()
        })
        .map_err(translate_persistence_error)?;

    let mut emails: Vec<EmailMessage> = Vec::new();
    for obligation in due {
        let establishment: Establishment = persistence
            .get_establishment(obligation.establishment_id)
            .map_err(translate_persistence_error)?;
        if let Some(contact) = establishment.contact_email {
            emails.push(EmailMessage::new(
                contact,
                String::from("Reinspection due"),
                format!(
                    "A reinspection of {} was due on {}. Please coordinate with your EMB regional office.",
                    establishment.name, obligation.due_date
                ),
            ));
        }
        if let Some(obligation_id) = obligation.obligation_id {
            persistence
                .mark_reminder_sent(obligation_id)
                .map_err(translate_persistence_error)?;
        }
    }
    Ok(emails)
}

/// Forcibly sets an inspection's state. Admin only.
///
/// This is the corrective escape hatch for stuck inspections; it
/// bypasses the transition table but still appends a history entry
/// carrying the reason.
///
/// # Errors
///
/// Returns `Validation` for an unknown state, an assignee on a
/// terminal state, or a missing assignee officer.
pub fn override_inspection_state(
    persistence: &mut SqlitePersistence,
    inspection_id: i64,
    request: OverrideStateRequest,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<InspectionResponse, ApiError> {
    let actor: Officer = authenticate_officer(persistence, actor_id)?;
    require_role(&actor, Role::Admin)?;

    let new_state: InspectionState =
        InspectionState::from_str(&request.new_state).map_err(translate_domain_error)?;
    if new_state.is_terminal() && request.assignee.is_some() {
        return Err(ApiError::Validation {
            field: String::from("assignee"),
            message: String::from("Terminal states must not carry an assignee"),
        });
    }
    if let Some(assignee_id) = request.assignee {
        persistence
            .get_officer(assignee_id)
            .map_err(translate_persistence_error)?;
    }

    let inspection: Inspection = persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    let history: HistoryEntry = HistoryEntry::new(
        Some(inspection.current_state),
        new_state,
        actor_id,
        actor.name.clone(),
        Some(format!("Admin override: {}", request.reason)),
        now,
    );
    persistence
        .override_inspection_state(inspection_id, new_state, request.assignee, &history, now)
        .map_err(translate_persistence_error)?;
    info!(
        inspection_id,
        new_state = new_state.as_str(),
        "Inspection state overridden"
    );

    let refreshed: Inspection = persistence
        .load_inspection(inspection_id)
        .map_err(translate_persistence_error)?;
    inspection_response(&refreshed, &actor)
}

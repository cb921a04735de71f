// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{CreateInspection, InspectionCommand, NovPayload};
use crate::error::CoreError;
use crate::registry::OfficerRegistry;
use crate::resolver::resolve_assignee;
use crate::transitions::{TRANSITION_TABLE, TransitionRule, TransitionTarget, check_guard,
    lookup_rule};
use emb_inspect_domain::{
    ComplianceDecision, Inspection, InspectionAction, InspectionForm, InspectionState,
    ObligationStatus, Officer, ReinspectionObligation, Role, reinspection_due_date,
};
use emb_inspect_events::{EmailMessage, HistoryEntry, Notification, NotificationKind};
use time::{Date, OffsetDateTime};

/// One committed-together piece of an action: a state change with its
/// history entry and the events it fans out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionStep {
    /// The state before this step.
    pub previous_state: InspectionState,
    /// The state after this step.
    pub new_state: InspectionState,
    /// The officer owning the new state, `None` for terminal states and
    /// transient monitoring-outcome states.
    pub assignee: Option<Officer>,
    /// The history entry recording this step.
    pub history: HistoryEntry,
    /// In-app notifications, persisted with the step.
    pub notifications: Vec<Notification>,
    /// Outbound emails, dispatched best-effort after commit.
    pub emails: Vec<EmailMessage>,
}

/// The full result of applying a command.
///
/// All steps commit atomically: either every entry lands or none do.
/// The monitoring completion therefore appears to clients as a single
/// move from `MonitoringInProgress` to the review leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The ordered steps this command produced.
    pub steps: Vec<TransitionStep>,
    /// The form after payload merging.
    pub form: InspectionForm,
    /// The state after the last step.
    pub final_state: InspectionState,
    /// The assignee after the last step.
    pub final_assignee: Option<i64>,
    /// Reinspection obligations to upsert (terminal closures only).
    pub obligations: Vec<ReinspectionObligation>,
}

/// The result of creating an inspection.
///
/// The aggregate carries no id and no code yet; both are assigned by
/// the persistence layer at first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationOutcome {
    /// The new aggregate, landing directly in `SectionAssigned`.
    pub inspection: Inspection,
    /// The creating history entry (no previous state).
    pub history: HistoryEntry,
    /// Notification to the resolved Section Chief.
    pub notifications: Vec<Notification>,
}

/// Creates a new inspection aggregate.
///
/// The actor must be the active Division Chief. The inspection lands in
/// `SectionAssigned` with the resolved Section Chief as assignee.
///
/// # Errors
///
/// - `PermissionDenied` unless the actor is an active Division Chief.
/// - `DomainViolation(EmptyEstablishments)` for an empty establishment
///   set.
/// - `NoAssigneeFound` when no Section Chief matches the law.
pub fn create_inspection(
    registry: &OfficerRegistry,
    request: CreateInspection,
    actor: &Officer,
    now: OffsetDateTime,
) -> Result<CreationOutcome, CoreError> {
    let actor_id: i64 = actor.id()?;
    if !actor.active || actor.role != Role::DivisionChief {
        return Err(CoreError::PermissionDenied {
            action: String::from("create"),
            role: actor.role,
        });
    }
    if request.establishment_ids.is_empty() {
        return Err(CoreError::DomainViolation(
            emb_inspect_domain::DomainError::EmptyEstablishments,
        ));
    }

    let assignee: Officer = resolve_assignee(
        registry,
        InspectionState::SectionAssigned,
        request.law,
        request.district.as_ref(),
    )?;
    let assignee_id: i64 = assignee.id()?;

    let inspection: Inspection = Inspection {
        inspection_id: None,
        code: None,
        establishment_ids: request.establishment_ids,
        law: request.law,
        district: request.district,
        current_state: InspectionState::SectionAssigned,
        current_assignee: Some(assignee_id),
        created_by: actor_id,
        form: InspectionForm::new(request.scheduled_at, request.inspection_notes),
        created_at: now,
        updated_at: now,
    };

    let history: HistoryEntry = HistoryEntry::new(
        None,
        InspectionState::SectionAssigned,
        actor_id,
        actor.name.clone(),
        Some(format!("Inspection created under {}", request.law.code())),
        now,
    );

    let notifications: Vec<Notification> = vec![Notification::new(
        assignee_id,
        Some(actor_id),
        NotificationKind::InspectionForward,
        String::from("New inspection assigned"),
        format!(
            "A new {} inspection covering {} establishment(s) has been assigned to your section",
            inspection.law.code(),
            inspection.establishment_ids.len()
        ),
        inspection.inspection_id,
        now,
    )];

    Ok(CreationOutcome {
        inspection,
        history,
        notifications,
    })
}

/// Applies a workflow command to an inspection, producing the ordered
/// steps to commit.
///
/// Validation order: transition table lookup (role, state), assignment
/// check, payload merge and validation, form guards, assignee
/// resolution. Failures leave the aggregate untouched.
///
/// # Errors
///
/// Any [`CoreError`]; see the variants for the taxonomy.
#[allow(clippy::too_many_lines)]
pub fn apply_action(
    registry: &OfficerRegistry,
    inspection: &Inspection,
    command: &InspectionCommand,
    actor: &Officer,
    today: Date,
    now: OffsetDateTime,
) -> Result<ActionOutcome, CoreError> {
    inspection.validate()?;
    let actor_id: i64 = actor.id()?;
    let action: InspectionAction = command.action();

    if !actor.active {
        return Err(CoreError::PermissionDenied {
            action: action.verb().to_string(),
            role: actor.role,
        });
    }

    let rule: &TransitionRule = lookup_rule(inspection.current_state, actor.role, action)?;

    if rule.requires_assignment {
        if inspection.current_assignee != Some(actor_id) {
            return Err(CoreError::NotAssignedToYou { action });
        }
    } else {
        // assign_to_me claims an empty slot or re-affirms one's own.
        if inspection
            .current_assignee
            .is_some_and(|current| current != actor_id)
        {
            return Err(CoreError::NotAssignedToYou { action });
        }
        if actor.role.requires_law_section()
            && !actor
                .law_section
                .is_some_and(|section| section.covers(inspection.law))
        {
            return Err(CoreError::PermissionDenied {
                action: action.verb().to_string(),
                role: actor.role,
            });
        }
    }

    let form: InspectionForm = merge_payload(&inspection.form, command, inspection.current_state)?;
    check_guard(rule, &form)?;

    let primary_target: InspectionState = rule
        .target
        .resolve(inspection.law, form.compliance_decision);

    let mut steps: Vec<TransitionStep> = Vec::new();

    let primary_assignee: Option<Officer> = if action == InspectionAction::AssignToMe {
        Some(actor.clone())
    } else if primary_target.is_terminal() || rule.target == TransitionTarget::MonitoringOutcome {
        None
    } else if primary_target.owning_role() == Some(actor.role) {
        Some(actor.clone())
    } else {
        Some(resolve_assignee(
            registry,
            primary_target,
            inspection.law,
            inspection.district.as_ref(),
        )?)
    };

    let mut primary_notifications: Vec<Notification> = Vec::new();
    let mut primary_emails: Vec<EmailMessage> = Vec::new();

    match action {
        InspectionAction::Forward | InspectionAction::ForwardToLegal => {
            if let Some(next) = &primary_assignee {
                primary_notifications.push(handoff_notification(
                    NotificationKind::InspectionForward,
                    next,
                    actor_id,
                    inspection,
                    primary_target,
                    now,
                )?);
            }
        }
        InspectionAction::Review => {
            if let Some(next) = &primary_assignee {
                primary_notifications.push(handoff_notification(
                    NotificationKind::InspectionReview,
                    next,
                    actor_id,
                    inspection,
                    primary_target,
                    now,
                )?);
                if form.compliance_decision == Some(ComplianceDecision::NonCompliant) {
                    primary_emails.push(review_email(next, inspection, primary_target));
                }
            }
        }
        InspectionAction::Complete => {
            // Section and Unit completions notify the prospective
            // next-stage owner if one is configured.
            if let Some(next_stage) = prospective_next_stage(inspection.current_state) {
                let resolved = resolve_assignee(
                    registry,
                    next_stage.resolve(inspection.law, None),
                    inspection.law,
                    inspection.district.as_ref(),
                );
                if let Ok(next) = resolved {
                    primary_notifications.push(handoff_notification(
                        NotificationKind::InspectionCompleted,
                        &next,
                        actor_id,
                        inspection,
                        inspection.current_state,
                        now,
                    )?);
                }
            }
        }
        _ => {}
    }

    steps.push(TransitionStep {
        previous_state: inspection.current_state,
        new_state: primary_target,
        assignee: primary_assignee,
        history: HistoryEntry::new(
            Some(inspection.current_state),
            primary_target,
            actor_id,
            actor.name.clone(),
            history_remarks(command, &form),
            now,
        ),
        notifications: primary_notifications,
        emails: primary_emails,
    });

    // Monitoring completion chains straight into the review leg,
    // atomically with the completion itself.
    if rule.target == TransitionTarget::MonitoringOutcome {
        let review_target: InspectionState = if inspection.law.has_unit_head() {
            InspectionState::UnitReviewed
        } else {
            InspectionState::SectionReviewed
        };
        let reviewer: Officer = resolve_assignee(
            registry,
            review_target,
            inspection.law,
            inspection.district.as_ref(),
        )?;

        let notifications: Vec<Notification> = vec![handoff_notification(
            NotificationKind::InspectionCompleted,
            &reviewer,
            actor_id,
            inspection,
            review_target,
            now,
        )?];

        let emails: Vec<EmailMessage> =
            if form.compliance_decision == Some(ComplianceDecision::NonCompliant) {
                vec![review_email(&reviewer, inspection, review_target)]
            } else {
                Vec::new()
            };

        steps.push(TransitionStep {
            previous_state: primary_target,
            new_state: review_target,
            assignee: Some(reviewer),
            history: HistoryEntry::new(
                Some(primary_target),
                review_target,
                actor_id,
                actor.name.clone(),
                None,
                now,
            ),
            notifications,
            emails,
        });
    }

    let final_state: InspectionState = steps
        .last()
        .map_or(inspection.current_state, |step| step.new_state);
    let final_assignee: Option<i64> = steps
        .last()
        .and_then(|step| step.assignee.as_ref())
        .and_then(|officer| officer.officer_id);

    let obligations: Vec<ReinspectionObligation> = if final_state.is_terminal() {
        let outcome: ComplianceDecision = if final_state == InspectionState::ClosedCompliant {
            ComplianceDecision::Compliant
        } else {
            ComplianceDecision::NonCompliant
        };
        let due_date: Date = reinspection_due_date(outcome, today)?;
        inspection
            .establishment_ids
            .iter()
            .map(|&establishment_id| ReinspectionObligation {
                obligation_id: None,
                establishment_id,
                inspection_id: inspection.inspection_id,
                outcome,
                due_date,
                status: ObligationStatus::Pending,
                reminder_sent: false,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(ActionOutcome {
        steps,
        form,
        final_state,
        final_assignee,
        obligations,
    })
}

/// Computes the actions a viewer may currently invoke on an inspection.
///
/// Derived per request, never stored: table rows matching the current
/// state and the viewer's role, filtered by the assignment requirement
/// (claim rows only need the slot empty or already the viewer's own).
#[must_use]
pub fn available_actions(inspection: &Inspection, viewer: &Officer) -> Vec<InspectionAction> {
    let Some(viewer_id) = viewer.officer_id else {
        return Vec::new();
    };
    if !viewer.active {
        return Vec::new();
    }

    TRANSITION_TABLE
        .iter()
        .filter(|rule| rule.from == inspection.current_state && rule.role == viewer.role)
        .filter(|rule| {
            if rule.requires_assignment {
                inspection.current_assignee == Some(viewer_id)
            } else {
                inspection
                    .current_assignee
                    .is_none_or(|current| current == viewer_id)
            }
        })
        .map(|rule| rule.action)
        .collect()
}

/// Merges a command's payload into a copy of the form and validates the
/// payload's own required fields.
fn merge_payload(
    form: &InspectionForm,
    command: &InspectionCommand,
    current_state: InspectionState,
) -> Result<InspectionForm, CoreError> {
    let mut merged: InspectionForm = form.clone();

    match command {
        InspectionCommand::Complete {
            decision,
            violations_found,
            findings_summary,
        } => {
            if current_state == InspectionState::MonitoringInProgress {
                merged.compliance_decision = *decision;
                if violations_found.is_some() {
                    merged.violations_found.clone_from(violations_found);
                }
                if findings_summary.is_some() {
                    merged.findings_summary.clone_from(findings_summary);
                }
            }
        }
        InspectionCommand::SendNov(payload) => {
            require_text("violations", &payload.violations)?;
            require_text("compliance_instructions", &payload.compliance_instructions)?;
            merged.violations_found = Some(payload.violations.clone());
            merged.compliance_plan = Some(payload.compliance_instructions.clone());
            merged.compliance_deadline = Some(payload.compliance_deadline);
        }
        InspectionCommand::SendNoo(payload) => {
            require_text("violation_breakdown", &payload.violation_breakdown)?;
            merged.compliance_plan = Some(payload.violation_breakdown.clone());
            merged.compliance_deadline = Some(payload.payment_deadline);
        }
        _ => {}
    }

    Ok(merged)
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation {
            field: field.to_string(),
            message: format!("'{field}' must not be empty"),
        });
    }
    Ok(())
}

/// History remarks for the primary step of a command.
fn history_remarks(command: &InspectionCommand, form: &InspectionForm) -> Option<String> {
    match command {
        InspectionCommand::Complete { .. } => form
            .compliance_decision
            .map(|decision| format!("Compliance decision: {decision}")),
        InspectionCommand::SendNov(payload) => Some(nov_remarks(payload)),
        InspectionCommand::SendNoo(payload) => {
            Some(format!("Penalty fees: {}", payload.penalty_fees))
        }
        _ => None,
    }
}

fn nov_remarks(payload: &NovPayload) -> String {
    let mut parts: Vec<String> = vec![String::from("Notice of Violation issued")];
    if payload.required_office_visit {
        parts.push(String::from("office visit required"));
    }
    if let Some(remarks) = &payload.remarks {
        parts.push(remarks.clone());
    }
    parts.join("; ")
}

/// The next working stage after a Section or Unit completion, if any.
const fn prospective_next_stage(current: InspectionState) -> Option<TransitionTarget> {
    match current {
        InspectionState::SectionInProgress => Some(TransitionTarget::NextStage),
        InspectionState::UnitInProgress => {
            Some(TransitionTarget::Fixed(InspectionState::MonitoringAssigned))
        }
        _ => None,
    }
}

fn handoff_notification(
    kind: NotificationKind,
    recipient: &Officer,
    sender_id: i64,
    inspection: &Inspection,
    state: InspectionState,
    now: OffsetDateTime,
) -> Result<Notification, CoreError> {
    let recipient_id: i64 = recipient.id()?;
    let code: String = inspection
        .code
        .as_ref()
        .map_or_else(|| inspection.law.code().to_string(), ToString::to_string);
    let (title, message): (String, String) = match kind {
        NotificationKind::InspectionForward => (
            String::from("Inspection forwarded"),
            format!("Inspection {code} has been forwarded to you ({state})"),
        ),
        NotificationKind::InspectionReview => (
            String::from("Inspection for review"),
            format!("Inspection {code} awaits your review ({state})"),
        ),
        _ => (
            String::from("Inspection stage completed"),
            format!("Inspection {code} completed a stage and is headed your way"),
        ),
    };
    Ok(Notification::new(
        recipient_id,
        Some(sender_id),
        kind,
        title,
        message,
        inspection.inspection_id,
        now,
    ))
}

fn review_email(
    recipient: &Officer,
    inspection: &Inspection,
    state: InspectionState,
) -> EmailMessage {
    let code: String = inspection
        .code
        .as_ref()
        .map_or_else(|| inspection.law.code().to_string(), ToString::to_string);
    EmailMessage::new(
        recipient.email.clone(),
        format!("Non-compliant inspection {code} requires review"),
        format!(
            "Inspection {code} was found non-compliant and has moved to {state}. \
             Please review the findings."
        ),
    )
}

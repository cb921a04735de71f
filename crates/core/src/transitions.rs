// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use emb_inspect_domain::{
    ComplianceDecision, InspectionAction, InspectionForm, InspectionState, Law, Role,
};

/// Where a transition lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTarget {
    /// A fixed next state.
    Fixed(InspectionState),
    /// `UnitAssigned` when the law has a Unit stage, otherwise
    /// `MonitoringAssigned`.
    NextStage,
    /// `MonitoringCompletedCompliant` or `...NonCompliant` per the
    /// form's compliance decision. The engine chains a review step
    /// immediately after.
    MonitoringOutcome,
}

impl TransitionTarget {
    /// Computes the concrete next state for an inspection's law and the
    /// merged form.
    ///
    /// `MonitoringOutcome` requires the form to carry a decision; the
    /// caller validates that before resolving the target.
    #[must_use]
    pub const fn resolve(&self, law: Law, decision: Option<ComplianceDecision>) -> InspectionState {
        match self {
            Self::Fixed(state) => *state,
            Self::NextStage => {
                if law.has_unit_head() {
                    InspectionState::UnitAssigned
                } else {
                    InspectionState::MonitoringAssigned
                }
            }
            Self::MonitoringOutcome => match decision {
                Some(ComplianceDecision::NonCompliant) => {
                    InspectionState::MonitoringCompletedNonCompliant
                }
                _ => InspectionState::MonitoringCompletedCompliant,
            },
        }
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    /// The state the inspection must currently be in.
    pub from: InspectionState,
    /// The role the actor must hold.
    pub role: Role,
    /// The action verb.
    pub action: InspectionAction,
    /// Whether the actor must be the inspection's current assignee.
    /// `assign_to_me` rows are role-based: they claim an empty or
    /// already-own slot instead.
    pub requires_assignment: bool,
    /// Where the transition lands.
    pub target: TransitionTarget,
}

/// The fixed transition table. Every state change the engine will ever
/// perform appears here; anything else is `InvalidTransition`.
pub const TRANSITION_TABLE: &[TransitionRule] = &[
    TransitionRule {
        from: InspectionState::SectionAssigned,
        role: Role::SectionChief,
        action: InspectionAction::AssignToMe,
        requires_assignment: false,
        target: TransitionTarget::Fixed(InspectionState::SectionAssigned),
    },
    TransitionRule {
        from: InspectionState::SectionAssigned,
        role: Role::SectionChief,
        action: InspectionAction::Start,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::SectionInProgress),
    },
    TransitionRule {
        from: InspectionState::SectionAssigned,
        role: Role::SectionChief,
        action: InspectionAction::Forward,
        requires_assignment: true,
        target: TransitionTarget::NextStage,
    },
    TransitionRule {
        from: InspectionState::SectionInProgress,
        role: Role::SectionChief,
        action: InspectionAction::Complete,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::SectionCompleted),
    },
    TransitionRule {
        from: InspectionState::SectionCompleted,
        role: Role::SectionChief,
        action: InspectionAction::Forward,
        requires_assignment: true,
        target: TransitionTarget::NextStage,
    },
    TransitionRule {
        from: InspectionState::UnitAssigned,
        role: Role::UnitHead,
        action: InspectionAction::AssignToMe,
        requires_assignment: false,
        target: TransitionTarget::Fixed(InspectionState::UnitAssigned),
    },
    TransitionRule {
        from: InspectionState::UnitAssigned,
        role: Role::UnitHead,
        action: InspectionAction::Start,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::UnitInProgress),
    },
    TransitionRule {
        from: InspectionState::UnitInProgress,
        role: Role::UnitHead,
        action: InspectionAction::Complete,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::UnitCompleted),
    },
    TransitionRule {
        from: InspectionState::UnitCompleted,
        role: Role::UnitHead,
        action: InspectionAction::Forward,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::MonitoringAssigned),
    },
    TransitionRule {
        from: InspectionState::MonitoringAssigned,
        role: Role::MonitoringPersonnel,
        action: InspectionAction::Start,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::MonitoringInProgress),
    },
    TransitionRule {
        from: InspectionState::MonitoringInProgress,
        role: Role::MonitoringPersonnel,
        action: InspectionAction::Complete,
        requires_assignment: true,
        target: TransitionTarget::MonitoringOutcome,
    },
    TransitionRule {
        from: InspectionState::UnitReviewed,
        role: Role::UnitHead,
        action: InspectionAction::Review,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::SectionReviewed),
    },
    TransitionRule {
        from: InspectionState::SectionReviewed,
        role: Role::SectionChief,
        action: InspectionAction::Review,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::DivisionReviewed),
    },
    TransitionRule {
        from: InspectionState::DivisionReviewed,
        role: Role::DivisionChief,
        action: InspectionAction::ForwardToLegal,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::LegalReviewNonCompliant),
    },
    TransitionRule {
        from: InspectionState::DivisionReviewed,
        role: Role::DivisionChief,
        action: InspectionAction::Close,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::ClosedCompliant),
    },
    TransitionRule {
        from: InspectionState::LegalReviewNonCompliant,
        role: Role::LegalUnit,
        action: InspectionAction::SendNov,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::NovSent),
    },
    TransitionRule {
        from: InspectionState::NovSent,
        role: Role::LegalUnit,
        action: InspectionAction::SendNoo,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::NooSent),
    },
    TransitionRule {
        from: InspectionState::LegalReviewNonCompliant,
        role: Role::LegalUnit,
        action: InspectionAction::Close,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::ClosedNonCompliant),
    },
    TransitionRule {
        from: InspectionState::NovSent,
        role: Role::LegalUnit,
        action: InspectionAction::Close,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::ClosedNonCompliant),
    },
    TransitionRule {
        from: InspectionState::NooSent,
        role: Role::LegalUnit,
        action: InspectionAction::Close,
        requires_assignment: true,
        target: TransitionTarget::Fixed(InspectionState::ClosedNonCompliant),
    },
];

/// Finds the table row for a (state, role, action) triple.
///
/// # Errors
///
/// - `InvalidTransition` when no row exists for the (state, action)
///   pair at all.
/// - `PermissionDenied` when rows exist but none for the actor's role.
pub fn lookup_rule(
    from: InspectionState,
    role: Role,
    action: InspectionAction,
) -> Result<&'static TransitionRule, CoreError> {
    if let Some(rule) = TRANSITION_TABLE
        .iter()
        .find(|r| r.from == from && r.action == action && r.role == role)
    {
        return Ok(rule);
    }

    if TRANSITION_TABLE
        .iter()
        .any(|r| r.from == from && r.action == action)
    {
        return Err(CoreError::PermissionDenied {
            action: action.verb().to_string(),
            role,
        });
    }

    Err(CoreError::InvalidTransition {
        state: from,
        action,
    })
}

/// Checks the form-level preconditions of a rule against the merged
/// form.
///
/// # Errors
///
/// - `Validation` when the Monitoring completion lacks a decision, or a
///   non-compliant decision lacks violations.
/// - `InvalidTransition` when `forward_to_legal` is attempted on a
///   compliant outcome or `close` at division level on a non-compliant
///   one.
pub fn check_guard(rule: &TransitionRule, form: &InspectionForm) -> Result<(), CoreError> {
    match (rule.from, rule.action) {
        (InspectionState::MonitoringInProgress, InspectionAction::Complete) => {
            let Some(decision) = form.compliance_decision else {
                return Err(CoreError::Validation {
                    field: String::from("compliance_decision"),
                    message: String::from("Monitoring completion requires a compliance decision"),
                });
            };
            if decision == ComplianceDecision::NonCompliant && !form.has_violations() {
                return Err(CoreError::Validation {
                    field: String::from("violations_found"),
                    message: String::from(
                        "A non-compliant completion requires the violations found",
                    ),
                });
            }
            Ok(())
        }
        (InspectionState::DivisionReviewed, InspectionAction::ForwardToLegal) => {
            if form.compliance_decision == Some(ComplianceDecision::NonCompliant) {
                Ok(())
            } else {
                Err(CoreError::InvalidTransition {
                    state: rule.from,
                    action: rule.action,
                })
            }
        }
        (InspectionState::DivisionReviewed, InspectionAction::Close) => {
            if form.compliance_decision == Some(ComplianceDecision::Compliant) {
                Ok(())
            } else {
                Err(CoreError::InvalidTransition {
                    state: rule.from,
                    action: rule.action,
                })
            }
        }
        _ => Ok(()),
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::officer::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The workflow state of an inspection.
///
/// The state graph is fixed: every transition must appear in the core
/// transition table. Each non-terminal state (other than `Created`) is
/// owned by exactly one role, and the inspection's current assignee is
/// the unique officer resolved for that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionState {
    /// Initial placeholder before routing. Not reachable through normal
    /// creation, which lands directly in `SectionAssigned`.
    Created,
    /// Under Legal Unit review (pre-violation path).
    LegalReview,
    /// Created at division level, not yet routed.
    DivisionCreated,
    /// Assigned to the Section Chief.
    SectionAssigned,
    /// Section work in progress.
    SectionInProgress,
    /// Section work complete, awaiting forward.
    SectionCompleted,
    /// Assigned to the Unit Head.
    UnitAssigned,
    /// Unit work in progress.
    UnitInProgress,
    /// Unit work complete, awaiting forward.
    UnitCompleted,
    /// Assigned to Monitoring Personnel.
    MonitoringAssigned,
    /// Monitoring visit in progress.
    MonitoringInProgress,
    /// Monitoring finished with a compliant verdict. Transient: the
    /// engine immediately chains into the review leg.
    MonitoringCompletedCompliant,
    /// Monitoring finished with a non-compliant verdict. Transient.
    MonitoringCompletedNonCompliant,
    /// Under Unit Head review.
    UnitReviewed,
    /// Under Section Chief review.
    SectionReviewed,
    /// Under Division Chief review.
    DivisionReviewed,
    /// Forwarded to the Legal Unit for a non-compliant outcome.
    LegalReviewNonCompliant,
    /// Notice of Violation issued.
    NovSent,
    /// Notice of Order issued.
    NooSent,
    /// Terminal: closed with a compliant outcome.
    ClosedCompliant,
    /// Terminal: closed with a non-compliant outcome.
    ClosedNonCompliant,
}

/// Coarse status label grouping several concrete states for UI display.
///
/// Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplifiedStatus {
    /// Created but not yet being worked.
    Created,
    /// Somewhere in the Section / Unit / Monitoring working leg.
    InProgress,
    /// In the post-monitoring review chain.
    ForReview,
    /// With the Legal Unit.
    Legal,
    /// Closed.
    Closed,
}

impl SimplifiedStatus {
    /// Returns the display string for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::InProgress => "IN_PROGRESS",
            Self::ForReview => "FOR_REVIEW",
            Self::Legal => "LEGAL",
            Self::Closed => "CLOSED",
        }
    }
}

impl InspectionState {
    /// Returns the stored string for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::LegalReview => "LEGAL_REVIEW",
            Self::DivisionCreated => "DIVISION_CREATED",
            Self::SectionAssigned => "SECTION_ASSIGNED",
            Self::SectionInProgress => "SECTION_IN_PROGRESS",
            Self::SectionCompleted => "SECTION_COMPLETED",
            Self::UnitAssigned => "UNIT_ASSIGNED",
            Self::UnitInProgress => "UNIT_IN_PROGRESS",
            Self::UnitCompleted => "UNIT_COMPLETED",
            Self::MonitoringAssigned => "MONITORING_ASSIGNED",
            Self::MonitoringInProgress => "MONITORING_IN_PROGRESS",
            Self::MonitoringCompletedCompliant => "MONITORING_COMPLETED_COMPLIANT",
            Self::MonitoringCompletedNonCompliant => "MONITORING_COMPLETED_NON_COMPLIANT",
            Self::UnitReviewed => "UNIT_REVIEWED",
            Self::SectionReviewed => "SECTION_REVIEWED",
            Self::DivisionReviewed => "DIVISION_REVIEWED",
            Self::LegalReviewNonCompliant => "LEGAL_REVIEW_NON_COMPLIANT",
            Self::NovSent => "NOV_SENT",
            Self::NooSent => "NOO_SENT",
            Self::ClosedCompliant => "CLOSED_COMPLIANT",
            Self::ClosedNonCompliant => "CLOSED_NON_COMPLIANT",
        }
    }

    /// Returns whether this state is terminal. Terminal states have no
    /// assignee.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ClosedCompliant | Self::ClosedNonCompliant)
    }

    /// Returns the role that owns this state, or `None` for `Created`
    /// and terminal states.
    #[must_use]
    pub const fn owning_role(&self) -> Option<Role> {
        match self {
            Self::Created | Self::ClosedCompliant | Self::ClosedNonCompliant => None,
            Self::LegalReview | Self::LegalReviewNonCompliant | Self::NovSent | Self::NooSent => {
                Some(Role::LegalUnit)
            }
            Self::DivisionCreated | Self::DivisionReviewed => Some(Role::DivisionChief),
            Self::SectionAssigned
            | Self::SectionInProgress
            | Self::SectionCompleted
            | Self::SectionReviewed => Some(Role::SectionChief),
            Self::UnitAssigned
            | Self::UnitInProgress
            | Self::UnitCompleted
            | Self::UnitReviewed
            | Self::MonitoringCompletedCompliant
            | Self::MonitoringCompletedNonCompliant => Some(Role::UnitHead),
            Self::MonitoringAssigned | Self::MonitoringInProgress => {
                Some(Role::MonitoringPersonnel)
            }
        }
    }

    /// Returns the coarse UI label for this state.
    #[must_use]
    pub const fn simplified_status(&self) -> SimplifiedStatus {
        match self {
            Self::Created | Self::DivisionCreated => SimplifiedStatus::Created,
            Self::SectionAssigned
            | Self::SectionInProgress
            | Self::SectionCompleted
            | Self::UnitAssigned
            | Self::UnitInProgress
            | Self::UnitCompleted
            | Self::MonitoringAssigned
            | Self::MonitoringInProgress => SimplifiedStatus::InProgress,
            Self::MonitoringCompletedCompliant
            | Self::MonitoringCompletedNonCompliant
            | Self::UnitReviewed
            | Self::SectionReviewed
            | Self::DivisionReviewed => SimplifiedStatus::ForReview,
            Self::LegalReview | Self::LegalReviewNonCompliant | Self::NovSent | Self::NooSent => {
                SimplifiedStatus::Legal
            }
            Self::ClosedCompliant | Self::ClosedNonCompliant => SimplifiedStatus::Closed,
        }
    }
}

impl FromStr for InspectionState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "LEGAL_REVIEW" => Ok(Self::LegalReview),
            "DIVISION_CREATED" => Ok(Self::DivisionCreated),
            "SECTION_ASSIGNED" => Ok(Self::SectionAssigned),
            "SECTION_IN_PROGRESS" => Ok(Self::SectionInProgress),
            "SECTION_COMPLETED" => Ok(Self::SectionCompleted),
            "UNIT_ASSIGNED" => Ok(Self::UnitAssigned),
            "UNIT_IN_PROGRESS" => Ok(Self::UnitInProgress),
            "UNIT_COMPLETED" => Ok(Self::UnitCompleted),
            "MONITORING_ASSIGNED" => Ok(Self::MonitoringAssigned),
            "MONITORING_IN_PROGRESS" => Ok(Self::MonitoringInProgress),
            "MONITORING_COMPLETED_COMPLIANT" => Ok(Self::MonitoringCompletedCompliant),
            "MONITORING_COMPLETED_NON_COMPLIANT" => Ok(Self::MonitoringCompletedNonCompliant),
            "UNIT_REVIEWED" => Ok(Self::UnitReviewed),
            "SECTION_REVIEWED" => Ok(Self::SectionReviewed),
            "DIVISION_REVIEWED" => Ok(Self::DivisionReviewed),
            "LEGAL_REVIEW_NON_COMPLIANT" => Ok(Self::LegalReviewNonCompliant),
            "NOV_SENT" => Ok(Self::NovSent),
            "NOO_SENT" => Ok(Self::NooSent),
            "CLOSED_COMPLIANT" => Ok(Self::ClosedCompliant),
            "CLOSED_NON_COMPLIANT" => Ok(Self::ClosedNonCompliant),
            _ => Err(DomainError::InvalidState(s.to_string())),
        }
    }
}

impl std::fmt::Display for InspectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

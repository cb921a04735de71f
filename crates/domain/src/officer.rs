// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::district::District;
use crate::error::DomainError;
use crate::law::LawSection;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Officer roles within the bureau.
///
/// Roles determine which workflow states an officer can own and which
/// actions they may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// System administration. Not part of the review chain.
    Admin,
    /// Legal Unit officer. Owns legal review, NOV and NOO issuance.
    LegalUnit,
    /// Division Chief. Creates inspections and performs the final review.
    DivisionChief,
    /// Section Chief for one law section.
    SectionChief,
    /// Unit Head for one law section (EIA / Air / Water only).
    UnitHead,
    /// Monitoring Personnel for one law section within one district.
    MonitoringPersonnel,
}

impl Role {
    /// Returns whether officers in this role must carry a law section.
    ///
    /// Admin, Legal Unit and Division Chief must not carry one.
    #[must_use]
    pub const fn requires_law_section(&self) -> bool {
        matches!(
            self,
            Self::SectionChief | Self::UnitHead | Self::MonitoringPersonnel
        )
    }

    /// Returns whether this role may assign districts to officers.
    #[must_use]
    pub const fn can_assign_district(&self) -> bool {
        matches!(self, Self::Admin | Self::SectionChief | Self::UnitHead)
    }

    /// Returns the stored string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::LegalUnit => "LEGAL_UNIT",
            Self::DivisionChief => "DIVISION_CHIEF",
            Self::SectionChief => "SECTION_CHIEF",
            Self::UnitHead => "UNIT_HEAD",
            Self::MonitoringPersonnel => "MONITORING_PERSONNEL",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "LEGAL_UNIT" => Ok(Self::LegalUnit),
            "DIVISION_CHIEF" => Ok(Self::DivisionChief),
            "SECTION_CHIEF" => Ok(Self::SectionChief),
            "UNIT_HEAD" => Ok(Self::UnitHead),
            "MONITORING_PERSONNEL" => Ok(Self::MonitoringPersonnel),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An officer of the bureau.
///
/// Officers are referenced weakly everywhere: they may be deactivated but
/// are never deleted in a way that orphans history. `officer_id` is the
/// canonical identifier; `None` indicates the officer has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    /// Canonical identifier assigned by the database.
    pub officer_id: Option<i64>,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The officer's role.
    pub role: Role,
    /// The law section this officer covers, if the role requires one.
    pub law_section: Option<LawSection>,
    /// The district this officer covers, if assigned.
    pub district: Option<District>,
    /// Whether the officer currently holds their role slot.
    pub active: bool,
}

impl Officer {
    /// Creates a new officer without a persisted id.
    #[must_use]
    pub const fn new(
        email: String,
        name: String,
        role: Role,
        law_section: Option<LawSection>,
        district: Option<District>,
        active: bool,
    ) -> Self {
        Self {
            officer_id: None,
            email,
            name,
            role,
            law_section,
            district,
            active,
        }
    }

    /// Creates an officer with an existing persisted id.
    #[must_use]
    pub const fn with_id(
        officer_id: i64,
        email: String,
        name: String,
        role: Role,
        law_section: Option<LawSection>,
        district: Option<District>,
        active: bool,
    ) -> Self {
        Self {
            officer_id: Some(officer_id),
            email,
            name,
            role,
            law_section,
            district,
            active,
        }
    }

    /// Returns the persisted id, or an error if the officer has never
    /// been saved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnpersistedOfficer` when `officer_id` is
    /// `None`.
    pub fn id(&self) -> Result<i64, DomainError> {
        self.officer_id
            .ok_or_else(|| DomainError::UnpersistedOfficer(self.email.clone()))
    }
}

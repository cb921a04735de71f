// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown law code.
    InvalidLaw(String),
    /// Unknown law section string.
    InvalidLawSection(String),
    /// Unknown role string.
    InvalidRole(String),
    /// Unknown inspection state string.
    InvalidState(String),
    /// Unknown action verb.
    InvalidAction(String),
    /// Unknown compliance decision string.
    InvalidComplianceDecision(String),
    /// Unknown obligation status string.
    InvalidObligationStatus(String),
    /// Inspection code does not match the required format.
    InvalidCode(String),
    /// Officer email is empty or malformed.
    InvalidEmail(String),
    /// Officer name is empty.
    InvalidName(String),
    /// The role requires a law section but none was provided.
    MissingLawSection {
        /// The role missing its section.
        role: String,
    },
    /// The role must not carry a law section but one was provided.
    UnexpectedLawSection {
        /// The offending role.
        role: String,
    },
    /// Another active officer already holds this role slot.
    RoleSlotOccupied {
        /// The contested role.
        role: String,
        /// The law section of the slot, if scoped.
        law_section: Option<String>,
        /// The district of the slot, if scoped.
        district: Option<String>,
        /// The officer currently holding the slot.
        held_by: String,
    },
    /// An inspection must reference at least one establishment.
    EmptyEstablishments,
    /// An operation needed a persisted officer id.
    UnpersistedOfficer(String),
    /// Date arithmetic left the representable range.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLaw(code) => write!(f, "Unknown law code: '{code}'"),
            Self::InvalidLawSection(s) => write!(f, "Unknown law section: '{s}'"),
            Self::InvalidRole(s) => write!(f, "Unknown role: '{s}'"),
            Self::InvalidState(s) => write!(f, "Unknown inspection state: '{s}'"),
            Self::InvalidAction(s) => write!(f, "Unknown action: '{s}'"),
            Self::InvalidComplianceDecision(s) => {
                write!(f, "Unknown compliance decision: '{s}'")
            }
            Self::InvalidObligationStatus(s) => {
                write!(f, "Unknown obligation status: '{s}'")
            }
            Self::InvalidCode(s) => write!(f, "Invalid inspection code: '{s}'"),
            Self::InvalidEmail(s) => write!(f, "Invalid officer email: '{s}'"),
            Self::InvalidName(s) => write!(f, "Invalid officer name: '{s}'"),
            Self::MissingLawSection { role } => {
                write!(f, "Role {role} requires a law section")
            }
            Self::UnexpectedLawSection { role } => {
                write!(f, "Role {role} must not carry a law section")
            }
            Self::RoleSlotOccupied {
                role,
                law_section,
                district,
                held_by,
            } => {
                write!(f, "Role slot {role}")?;
                if let Some(section) = law_section {
                    write!(f, " / {section}")?;
                }
                if let Some(district) = district {
                    write!(f, " / {district}")?;
                }
                write!(f, " is already held by {held_by}")
            }
            Self::EmptyEstablishments => {
                write!(f, "An inspection requires at least one establishment")
            }
            Self::UnpersistedOfficer(email) => {
                write!(f, "Officer '{email}' has not been persisted")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

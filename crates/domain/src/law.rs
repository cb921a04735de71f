// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five environmental laws an inspection is conducted under.
///
/// The law determines the inspection code prefix and whether the workflow
/// passes through the Unit stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Law {
    /// PD-1586 — Environmental Impact Assessment.
    Eia,
    /// RA-6969 — Toxic Substances and Hazardous Wastes.
    Toxic,
    /// RA-8749 — Clean Air Act.
    Air,
    /// RA-9275 — Clean Water Act.
    Water,
    /// RA-9003 — Ecological Solid Waste Management.
    SolidWaste,
}

impl Law {
    /// All laws, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Eia,
        Self::Toxic,
        Self::Air,
        Self::Water,
        Self::SolidWaste,
    ];

    /// Returns the legal code for this law (e.g. `"PD-1586"`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eia => "PD-1586",
            Self::Toxic => "RA-6969",
            Self::Air => "RA-8749",
            Self::Water => "RA-9275",
            Self::SolidWaste => "RA-9003",
        }
    }

    /// Returns the inspection code prefix for this law (e.g. `"EIA"`).
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Eia => "EIA",
            Self::Toxic => "TOX",
            Self::Air => "AIR",
            Self::Water => "WATER",
            Self::SolidWaste => "WASTE",
        }
    }

    /// Returns whether inspections under this law pass through the Unit
    /// stage. Toxic and Solid Waste route directly from Section to
    /// Monitoring.
    #[must_use]
    pub const fn has_unit_head(&self) -> bool {
        matches!(self, Self::Eia | Self::Air | Self::Water)
    }

    /// Parses a law from its legal code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLaw` if the code is not one of the
    /// five known laws.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code {
            "PD-1586" => Ok(Self::Eia),
            "RA-6969" => Ok(Self::Toxic),
            "RA-8749" => Ok(Self::Air),
            "RA-9275" => Ok(Self::Water),
            "RA-9003" => Ok(Self::SolidWaste),
            _ => Err(DomainError::InvalidLaw(code.to_string())),
        }
    }
}

impl FromStr for Law {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Law {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A law section an officer may be assigned to.
///
/// Most officers cover a single law. One combined assignment exists:
/// `PD-1586,RA-8749,RA-9275` covers EIA, Air, and Water simultaneously.
/// During assignee resolution an exact single-law match always wins over
/// a combined match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LawSection {
    /// Responsibility for a single law.
    Single(Law),
    /// The combined EIA / Air / Water section.
    EiaAirWater,
}

impl LawSection {
    /// The stored marker for the combined section.
    pub const COMBINED_MARKER: &'static str = "PD-1586,RA-8749,RA-9275";

    /// Returns whether this section covers the given law.
    #[must_use]
    pub fn covers(&self, law: Law) -> bool {
        match self {
            Self::Single(own) => *own == law,
            Self::EiaAirWater => matches!(law, Law::Eia | Law::Air | Law::Water),
        }
    }

    /// Returns whether this section is an exact single-law match for the
    /// given law. A combined section is never an exact match.
    #[must_use]
    pub fn is_exact(&self, law: Law) -> bool {
        matches!(self, Self::Single(own) if *own == law)
    }

    /// Returns the stored string for this section.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single(law) => law.code(),
            Self::EiaAirWater => Self::COMBINED_MARKER,
        }
    }

    /// Parses a law section from its stored string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLawSection` if the string is neither a
    /// law code nor the combined marker.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s == Self::COMBINED_MARKER {
            return Ok(Self::EiaAirWater);
        }
        Law::parse(s)
            .map(Self::Single)
            .map_err(|_| DomainError::InvalidLawSection(s.to_string()))
    }
}

impl FromStr for LawSection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LawSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

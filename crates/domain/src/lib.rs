// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod action;
mod district;
mod error;
mod form;
mod inspection;
mod law;
mod officer;
mod reinspection;
mod state;
mod validation;

#[cfg(test)]
mod tests;

pub use action::InspectionAction;
pub use district::{District, DistrictTable};
pub use error::DomainError;
pub use form::{ComplianceDecision, InspectionDocument, InspectionForm};
pub use inspection::{Establishment, Inspection, InspectionCode};
pub use law::{Law, LawSection};
pub use officer::{Officer, Role};
pub use reinspection::{
    COMPLIANT_REINSPECTION_DAYS, NON_COMPLIANT_REINSPECTION_DAYS, ObligationStatus,
    ReinspectionObligation, reinspection_due_date,
};
pub use state::{InspectionState, SimplifiedStatus};
pub use validation::{validate_officer_fields, validate_role_slot};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The inspection workflow engine.
//!
//! Pure functions over in-memory snapshots: the caller loads the officer
//! registry and the inspection aggregate, applies a command, and commits
//! the returned outcome atomically. Nothing in this crate performs I/O.

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

mod apply;
mod command;
mod error;
mod registry;
mod resolver;
mod transitions;

#[cfg(test)]
mod tests;

pub use apply::{
    ActionOutcome, CreationOutcome, TransitionStep, apply_action, available_actions,
    create_inspection,
};
pub use command::{CreateInspection, InspectionCommand, NooPayload, NovPayload};
pub use error::CoreError;
pub use registry::OfficerRegistry;
pub use resolver::resolve_assignee;
pub use transitions::{TRANSITION_TABLE, TransitionRule, TransitionTarget, lookup_rule};

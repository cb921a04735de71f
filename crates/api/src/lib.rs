// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the EMB inspection engine.
//!
//! The boundary owns authentication, authorization, DTO translation,
//! and the load-apply-persist orchestration cycle. It is transport
//! agnostic: the HTTP server wires these handlers to routes, but they
//! can equally be driven from tests or a CLI.

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
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{authenticate_officer, require_one_of, require_role};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};

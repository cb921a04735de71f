// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules.
//!
//! All read-only queries. Everything uses Diesel DSL over the schema in
//! `diesel_schema`; rows decode through the structs in `data_models`.
//!
//! ## Module Organization
//!
//! - `officers` — Roster lookups and filtered listings
//! - `establishments` — Establishment registry reads
//! - `inspections` — Aggregate loading and tab-filtered listings
//! - `notifications` — Per-recipient notification feeds
//! - `obligations` — Reinspection obligation listings

pub mod establishments;
pub mod inspections;
pub mod notifications;
pub mod obligations;
pub mod officers;

pub use inspections::InspectionListFilter;
pub use obligations::ObligationListFilter;
pub use officers::OfficerListFilter;

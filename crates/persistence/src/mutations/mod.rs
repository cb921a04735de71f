// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! All state-changing operations. The multi-table mutations
//! (`persist_creation`, `apply_transition`) run inside a single
//! transaction; callers never see a half-applied outcome.
//!
//! ## Module Organization
//!
//! - `officers` — Officer roster mutations
//! - `establishments` — Establishment registry mutations
//! - `inspections` — Inspection creation, transitions, documents
//! - `notifications` — Read-state mutations
//! - `obligations` — Reinspection obligation upserts and reminders

pub mod establishments;
pub mod inspections;
pub mod notifications;
pub mod obligations;
pub mod officers;

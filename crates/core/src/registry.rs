// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use emb_inspect_domain::{Officer, Role};

/// A snapshot of the active officer roster.
///
/// Loaded by the caller before applying a command and passed into the
/// engine; resolution never queries storage directly. Only active
/// officers participate in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerRegistry {
    officers: Vec<Officer>,
}

impl OfficerRegistry {
    /// Creates a registry from an officer roster, keeping only active
    /// officers.
    #[must_use]
    pub fn new(officers: Vec<Officer>) -> Self {
        Self {
            officers: officers.into_iter().filter(|o| o.active).collect(),
        }
    }

    /// Returns all active officers.
    #[must_use]
    pub fn officers(&self) -> &[Officer] {
        &self.officers
    }

    /// Returns all active officers holding a role.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Officer> {
        self.officers.iter().filter(move |o| o.role == role)
    }

    /// Looks up an active officer by persisted id.
    #[must_use]
    pub fn by_id(&self, officer_id: i64) -> Option<&Officer> {
        self.officers
            .iter()
            .find(|o| o.officer_id == Some(officer_id))
    }
}

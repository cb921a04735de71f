// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer roster queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::{District, LawSection, Officer, Role};
use tracing::debug;

use crate::data_models::OfficerRow;
use crate::diesel_schema::officers;
use crate::error::PersistenceError;

/// Filter for [`list_officers`]. Empty filter lists everyone.
#[derive(Debug, Clone, Default)]
pub struct OfficerListFilter {
    pub role: Option<Role>,
    pub law_section: Option<LawSection>,
    pub district: Option<District>,
    pub active_only: bool,
}

/// Retrieves an officer by id.
///
/// # Errors
///
/// Returns `OfficerNotFound` when no row matches.
pub fn get_officer(
    conn: &mut SqliteConnection,
    officer_id: i64,
) -> Result<Officer, PersistenceError> {
    let row: OfficerRow = officers::table
        .find(officer_id)
        .select(OfficerRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::OfficerNotFound(officer_id))?;
    row.into_domain()
}

/// Retrieves an officer by email (case-insensitive, matching the
/// unique index collation).
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` when the
/// officer is not found.
pub fn get_officer_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<Officer>, PersistenceError> {
    debug!("Looking up officer by email: {}", email);
    let row: Option<OfficerRow> = officers::table
        .filter(officers::email.eq(email))
        .select(OfficerRow::as_select())
        .first(conn)
        .optional()?;
    row.map(OfficerRow::into_domain).transpose()
}

/// Lists officers matching the filter.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_officers(
    conn: &mut SqliteConnection,
    filter: &OfficerListFilter,
) -> Result<Vec<Officer>, PersistenceError> {
    let mut query = officers::table.into_boxed();
    if let Some(role) = filter.role {
        query = query.filter(officers::role.eq(role.as_str()));
    }
    if let Some(section) = filter.law_section {
        query = query.filter(officers::law_section.eq(section.as_str()));
    }
    if let Some(district) = &filter.district {
        query = query.filter(officers::district.eq(district.value().to_string()));
    }
    if filter.active_only {
        query = query.filter(officers::active.eq(1));
    }

    let rows: Vec<OfficerRow> = query
        .order(officers::officer_id.asc())
        .select(OfficerRow::as_select())
        .load(conn)?;
    rows.into_iter().map(OfficerRow::into_domain).collect()
}

/// Loads every active officer, the roster snapshot the workflow engine
/// resolves assignees from.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn load_active_officers(
    conn: &mut SqliteConnection,
) -> Result<Vec<Officer>, PersistenceError> {
    list_officers(
        conn,
        &OfficerListFilter {
            active_only: true,
            ..OfficerListFilter::default()
        },
    )
}

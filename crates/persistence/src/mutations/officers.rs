// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer roster mutations.
//!
//! The role-slot invariants are validated in the domain layer before
//! these run; the partial unique indexes double-check at commit time.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::Officer;
use tracing::info;

use crate::diesel_schema::officers;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new officer.
///
/// # Errors
///
/// Returns an error if the insert fails, including unique-index
/// violations on the email or an occupied role slot.
pub fn create_officer(
    conn: &mut SqliteConnection,
    officer: &Officer,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(officers::table)
        .values((
            officers::email.eq(&officer.email),
            officers::name.eq(&officer.name),
            officers::role.eq(officer.role.as_str()),
            officers::law_section.eq(officer.law_section.map(|s| s.as_str())),
            officers::district.eq(officer.district.as_ref().map(|d| d.value().to_string())),
            officers::active.eq(i32::from(officer.active)),
        ))
        .execute(conn)?;

    let officer_id: i64 = get_last_insert_rowid(conn)?;
    info!(officer_id, role = officer.role.as_str(), "Created officer");
    Ok(officer_id)
}

/// Updates an officer's mutable fields (name, section, district).
///
/// # Errors
///
/// Returns `OfficerNotFound` when no row matches.
pub fn update_officer(
    conn: &mut SqliteConnection,
    officer_id: i64,
    officer: &Officer,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(officers::table.find(officer_id))
        .set((
            officers::name.eq(&officer.name),
            officers::law_section.eq(officer.law_section.map(|s| s.as_str())),
            officers::district.eq(officer.district.as_ref().map(|d| d.value().to_string())),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::OfficerNotFound(officer_id));
    }
    Ok(())
}

/// Activates or deactivates an officer.
///
/// # Errors
///
/// Returns `OfficerNotFound` when no row matches, or a database error
/// when activation collides with an occupied slot index.
pub fn set_officer_active(
    conn: &mut SqliteConnection,
    officer_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(officers::table.find(officer_id))
        .set(officers::active.eq(i32::from(active)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::OfficerNotFound(officer_id));
    }
    info!(officer_id, active, "Updated officer activation");
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Establishment registry queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::Establishment;

use crate::data_models::EstablishmentRow;
use crate::diesel_schema::{establishments, inspection_establishments};
use crate::error::PersistenceError;

/// Retrieves an establishment by id.
///
/// # Errors
///
/// Returns `EstablishmentNotFound` when no row matches.
pub fn get_establishment(
    conn: &mut SqliteConnection,
    establishment_id: i64,
) -> Result<Establishment, PersistenceError> {
    let row: EstablishmentRow = establishments::table
        .find(establishment_id)
        .select(EstablishmentRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EstablishmentNotFound(establishment_id))?;
    Ok(row.into_domain())
}

/// Lists all establishments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_establishments(
    conn: &mut SqliteConnection,
) -> Result<Vec<Establishment>, PersistenceError> {
    let rows: Vec<EstablishmentRow> = establishments::table
        .order(establishments::establishment_id.asc())
        .select(EstablishmentRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(EstablishmentRow::into_domain).collect())
}

/// Contact addresses for every establishment attached to an inspection.
///
/// Establishments without a contact address are skipped; legal notices
/// to them go out on paper only.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn contacts_for_inspection(
    conn: &mut SqliteConnection,
    inspection_id: i64,
) -> Result<Vec<(i64, String)>, PersistenceError> {
    let rows: Vec<(i64, Option<String>)> = inspection_establishments::table
        .inner_join(
            establishments::table.on(establishments::establishment_id
                .eq(inspection_establishments::establishment_id)),
        )
        .filter(inspection_establishments::inspection_id.eq(inspection_id))
        .select((
            establishments::establishment_id,
            establishments::contact_email,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .filter_map(|(id, email)| email.map(|email| (id, email)))
        .collect())
}

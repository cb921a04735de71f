// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Establishment registry mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use emb_inspect_domain::Establishment;
use tracing::info;

use crate::diesel_schema::establishments;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new establishment.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_establishment(
    conn: &mut SqliteConnection,
    establishment: &Establishment,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(establishments::table)
        .values((
            establishments::name.eq(&establishment.name),
            establishments::province.eq(&establishment.province),
            establishments::city.eq(&establishment.city),
            establishments::contact_email.eq(&establishment.contact_email),
        ))
        .execute(conn)?;

    let establishment_id: i64 = get_last_insert_rowid(conn)?;
    info!(establishment_id, "Created establishment");
    Ok(establishment_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota_domain::Availability;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::availability;
use crate::error::PersistenceError;

/// Inserts an availability window.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_availability(
    conn: &mut SqliteConnection,
    window: &Availability,
) -> Result<Availability, PersistenceError> {
    diesel::insert_into(availability::table)
        .values((
            availability::user_id.eq(window.user_id),
            availability::start_time.eq(format_timestamp(window.time_range.start())?),
            availability::end_time.eq(format_timestamp(window.time_range.end())?),
        ))
        .execute(conn)?;

    let availability_id: i64 = conn.get_last_insert_rowid()?;
    info!(availability_id, user_id = window.user_id, "Recorded availability");

    let mut saved: Availability = window.clone();
    saved.availability_id = Some(availability_id);
    Ok(saved)
}

/// Deletes an availability window.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the window does not exist.
pub fn delete_availability(
    conn: &mut SqliteConnection,
    availability_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(availability::table.find(availability_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Availability {availability_id} not found"
        )));
    }
    info!(availability_id, "Deleted availability");
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota_domain::Availability;

use crate::data_models::AvailabilityRow;
use crate::diesel_schema::availability;
use crate::error::PersistenceError;

/// Retrieves an availability window by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such window exists.
pub fn get_availability(
    conn: &mut SqliteConnection,
    availability_id: i64,
) -> Result<Availability, PersistenceError> {
    availability::table
        .find(availability_id)
        .select(AvailabilityRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Availability {availability_id} not found"))
        })?
        .into_domain()
}

/// Lists a user's windows, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_availability_by_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Availability>, PersistenceError> {
    let rows: Vec<AvailabilityRow> = availability::table
        .filter(availability::user_id.eq(user_id))
        .order((availability::start_time.asc(), availability::availability_id.asc()))
        .select(AvailabilityRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AvailabilityRow::into_domain).collect()
}

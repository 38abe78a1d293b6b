// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota_domain::ShiftSwapRequest;
use tracing::debug;

use crate::data_models::SwapRequestRow;
use crate::diesel_schema::{shift_swap_requests, shifts};
use crate::error::PersistenceError;

/// Retrieves a swap request by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such request exists.
pub fn get_swap_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<ShiftSwapRequest, PersistenceError> {
    shift_swap_requests::table
        .find(request_id)
        .select(SwapRequestRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Swap request {request_id} not found"))
        })?
        .into_domain()
}

/// Lists the requests awaiting action that `user_id` can see.
///
/// A request is listed while it is neither approved nor rejected and the
/// manager has not yet approved it, when the user is either the manager
/// of the shift or the proposed recipient. This is the SQL form of
/// `flexirota::is_pending_for` and must select exactly what it accepts.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_pending_swaps(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<ShiftSwapRequest>, PersistenceError> {
    let rows: Vec<SwapRequestRow> = shift_swap_requests::table
        .inner_join(shifts::table)
        .filter(shift_swap_requests::is_approved.eq(0))
        .filter(shift_swap_requests::manager_approved.eq(0))
        .filter(shift_swap_requests::rejected_at.is_null())
        .filter(
            shifts::manager_id
                .eq(user_id)
                .or(shift_swap_requests::requested_to.eq(user_id)),
        )
        .order(shift_swap_requests::request_id.asc())
        .select(SwapRequestRow::as_select())
        .load(conn)?;

    debug!(user_id, count = rows.len(), "Loaded pending swap requests");
    rows.into_iter().map(SwapRequestRow::into_domain).collect()
}

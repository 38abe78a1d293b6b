// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota::{SwapOutcome, SwapTransition};
use flexirota_domain::ShiftSwapRequest;
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{bool_to_int, format_timestamp};
use crate::diesel_schema::{shift_swap_requests, shifts};
use crate::error::PersistenceError;
use crate::mutations::schedule::write_swap_state;

fn optional_timestamp(
    value: Option<time::OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    value.map(format_timestamp).transpose()
}

/// Stores a newly opened swap request and marks its shift.
///
/// The shift is only marked while the requester still holds it. No other
/// shift column is written.
///
/// # Errors
///
/// Returns an error, with nothing written, if:
/// - The shift already has an unresolved request (`SwapAlreadyPending`)
/// - The shift changed hands since it was read (`Conflict`)
pub fn create_swap_request(
    conn: &mut SqliteConnection,
    transition: &SwapTransition,
) -> Result<ShiftSwapRequest, PersistenceError> {
    let request: &ShiftSwapRequest = &transition.request;

    conn.immediate_transaction(|conn| {
        diesel::insert_into(shift_swap_requests::table)
            .values((
                shift_swap_requests::shift_id.eq(request.shift_id),
                shift_swap_requests::requested_by.eq(request.requested_by),
                shift_swap_requests::requested_to.eq(request.requested_to),
                shift_swap_requests::reason.eq(request.reason.as_deref()),
                shift_swap_requests::requested_at.eq(format_timestamp(request.requested_at)?),
                shift_swap_requests::version.eq(request.version),
            ))
            .execute(conn)
            .map_err(|e| match PersistenceError::from(e) {
                PersistenceError::UniqueViolation(_) => PersistenceError::SwapAlreadyPending {
                    shift_id: request.shift_id,
                },
                other => other,
            })?;
        let request_id: i64 = conn.get_last_insert_rowid()?;

        let marked: usize = diesel::update(
            shifts::table
                .find(request.shift_id)
                .filter(shifts::employee_id.eq(request.requested_by)),
        )
        .set((
            shifts::is_swap_requested.eq(bool_to_int(true)),
            shifts::swap_approved.eq(bool_to_int(false)),
        ))
        .execute(conn)?;
        if marked == 0 {
            warn!(
                shift_id = request.shift_id,
                requested_by = request.requested_by,
                "Shift changed hands before the swap request was stored"
            );
            return Err(PersistenceError::Conflict(format!(
                "Shift {} is no longer held by user {}",
                request.shift_id, request.requested_by
            )));
        }

        info!(
            request_id,
            shift_id = request.shift_id,
            requested_by = request.requested_by,
            requested_to = request.requested_to,
            "Opened swap request"
        );

        let mut saved: ShiftSwapRequest = request.clone();
        saved.request_id = Some(request_id);
        Ok(saved)
    })
}

/// Persists an approval or rejection.
///
/// The request row is only written if its stored version still equals
/// `expected_version`, and the version is bumped on success. The request
/// and the shift change land in the same `BEGIN IMMEDIATE` transaction.
/// Of the shift only the swap flags are written, plus the holder when the
/// swap completes.
///
/// # Errors
///
/// Returns an error if:
/// - The request no longer exists (`NotFound`)
/// - The request was changed since it was read (`Conflict`)
pub fn persist_swap_transition(
    conn: &mut SqliteConnection,
    transition: &SwapTransition,
    expected_version: i64,
) -> Result<ShiftSwapRequest, PersistenceError> {
    let request: &ShiftSwapRequest = &transition.request;
    let request_id: i64 = request.request_id.ok_or_else(|| {
        PersistenceError::Other(String::from("Cannot persist an unsaved swap request"))
    })?;
    let next_version: i64 = expected_version + 1;

    conn.immediate_transaction(|conn| {
        let updated: usize = diesel::update(
            shift_swap_requests::table
                .filter(shift_swap_requests::request_id.eq(request_id))
                .filter(shift_swap_requests::version.eq(expected_version)),
        )
        .set((
            shift_swap_requests::manager_approved.eq(bool_to_int(request.manager_approved)),
            shift_swap_requests::recipient_approved.eq(bool_to_int(request.recipient_approved)),
            shift_swap_requests::is_approved.eq(bool_to_int(request.is_approved)),
            shift_swap_requests::approved_at.eq(optional_timestamp(request.approved_at)?),
            shift_swap_requests::rejected_at.eq(optional_timestamp(request.rejected_at)?),
            shift_swap_requests::version.eq(next_version),
        ))
        .execute(conn)?;

        if updated == 0 {
            let exists: bool = diesel::select(diesel::dsl::exists(
                shift_swap_requests::table.find(request_id),
            ))
            .get_result(conn)?;
            if !exists {
                return Err(PersistenceError::NotFound(format!(
                    "Swap request {request_id} not found"
                )));
            }
            warn!(
                request_id,
                expected_version, "Swap request changed concurrently"
            );
            return Err(PersistenceError::Conflict(format!(
                "Swap request {request_id} is no longer at version {expected_version}"
            )));
        }

        if let Some(shift) = &transition.shift {
            let reassign: bool = matches!(transition.outcome, SwapOutcome::Completed);
            write_swap_state(conn, shift, reassign)?;
        }

        info!(
            request_id,
            version = next_version,
            manager_approved = request.manager_approved,
            recipient_approved = request.recipient_approved,
            is_approved = request.is_approved,
            rejected = request.is_rejected(),
            "Persisted swap transition"
        );

        let mut saved: ShiftSwapRequest = request.clone();
        saved.version = next_version;
        Ok(saved)
    })
}

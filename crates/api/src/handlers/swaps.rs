// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota::{CoreError, SwapOutcome, SwapTransition};
use flexirota_domain::{DomainError, Shift, ShiftSwapRequest, User};
use flexirota_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::{actor_id, store_error, to_infos};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::policy::AssignmentPolicy;
use crate::request_response::{
    PendingSwapsResponse, RequestSwapRequest, SwapDecisionResponse, SwapRequestInfo, SwapStatus,
};

/// Offers the acting employee's shift to a colleague.
///
/// The shift is marked swap-requested in the same transaction that stores
/// the request.
///
/// # Errors
///
/// Returns an error if:
/// - The shift or recipient does not exist
/// - The actor does not hold the shift
/// - The recipient is the actor, not an employee, or in another organisation
/// - The shift already has an open request
pub fn request_swap(
    persistence: &mut Persistence,
    actor: &User,
    request: &RequestSwapRequest,
    now: OffsetDateTime,
) -> Result<SwapRequestInfo, ApiError> {
    let shift: Shift = persistence
        .get_shift(request.shift_id)
        .map_err(store_error("Shift"))?;
    let recipient: User = persistence
        .get_user(request.requested_to)
        .map_err(store_error("User"))?;
    let manager: User = persistence
        .get_user(shift.manager_id)
        .map_err(store_error("User"))?;
    let organisation_id: i64 = manager.organisation_id.ok_or_else(|| {
        translate_domain_error(DomainError::MissingOrganisation {
            user_id: shift.manager_id,
        })
    })?;

    let reason: Option<String> = request
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from);
    let transition: SwapTransition =
        flexirota::request_swap(&shift, actor, &recipient, organisation_id, reason, now)
            .map_err(translate_core_error)?;

    let saved: ShiftSwapRequest = persistence
        .create_swap_request(&transition)
        .map_err(store_error("Swap request"))?;
    SwapRequestInfo::try_from(&saved)
}

/// Reads the request and its shift, applies `decide`, and persists the
/// result under the request's version. Lost races are retried from a fresh
/// read up to `policy.max_conflict_retries` times.
///
/// Returns the transition with the request as stored.
fn decide_with_retry<F>(
    persistence: &mut Persistence,
    request_id: i64,
    policy: &AssignmentPolicy,
    decide: F,
) -> Result<SwapTransition, ApiError>
where
    F: Fn(&ShiftSwapRequest, &Shift) -> Result<SwapTransition, CoreError>,
{
    let attempts: u32 = policy.max_conflict_retries.saturating_add(1);
    for attempt in 1..=attempts {
        let request: ShiftSwapRequest = persistence
            .get_swap_request(request_id)
            .map_err(store_error("Swap request"))?;
        let shift: Shift = persistence
            .get_shift(request.shift_id)
            .map_err(store_error("Shift"))?;

        let mut transition: SwapTransition =
            decide(&request, &shift).map_err(translate_core_error)?;
        if transition.request == request {
            debug!(request_id, "Swap decision changed nothing");
            return Ok(transition);
        }

        match persistence.persist_swap_transition(&transition, request.version) {
            Ok(saved) => {
                transition.request = saved;
                return Ok(transition);
            }
            Err(PersistenceError::Conflict(message)) => {
                warn!(request_id, attempt, %message, "Swap request changed concurrently");
            }
            Err(other) => return Err(store_error("Swap request")(other)),
        }
    }

    Err(ApiError::Conflict {
        message: format!(
            "Swap request {request_id} kept changing; gave up after {attempts} attempts"
        ),
    })
}

fn decision_response(transition: &SwapTransition) -> Result<SwapDecisionResponse, ApiError> {
    let (status, waiting_on): (SwapStatus, Option<String>) = match transition.outcome {
        SwapOutcome::Partial { waiting_on } => {
            (SwapStatus::Partial, Some(waiting_on.as_str().to_string()))
        }
        SwapOutcome::Completed => (SwapStatus::Completed, None),
        SwapOutcome::Rejected => (SwapStatus::Rejected, None),
    };
    Ok(SwapDecisionResponse {
        status,
        waiting_on,
        request: SwapRequestInfo::try_from(&transition.request)?,
    })
}

/// Records the actor's approval of a swap request.
///
/// The actor must be the shift's manager or the proposed recipient, and
/// approving twice in the same capacity changes nothing. Once both have
/// approved, the shift is handed to the recipient.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is neither
/// party, the request is already approved or rejected, or it kept changing
/// concurrently.
pub fn approve_swap(
    persistence: &mut Persistence,
    actor: &User,
    request_id: i64,
    policy: &AssignmentPolicy,
    now: OffsetDateTime,
) -> Result<SwapDecisionResponse, ApiError> {
    let user_id: i64 = actor_id(actor)?;
    let transition: SwapTransition = decide_with_retry(persistence, request_id, policy, |r, s| {
        flexirota::approve(r, s, user_id, now)
    })?;

    info!(
        request_id,
        actor_id = user_id,
        outcome = ?transition.outcome,
        "Approved swap request"
    );
    decision_response(&transition)
}

/// Rejects a swap request, clearing both approvals and the shift's flags.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is neither
/// party, the request is already approved or rejected, or it kept changing
/// concurrently.
pub fn reject_swap(
    persistence: &mut Persistence,
    actor: &User,
    request_id: i64,
    policy: &AssignmentPolicy,
    now: OffsetDateTime,
) -> Result<SwapDecisionResponse, ApiError> {
    let user_id: i64 = actor_id(actor)?;
    let transition: SwapTransition = decide_with_retry(persistence, request_id, policy, |r, s| {
        flexirota::reject(r, s, user_id, now)
    })?;

    info!(request_id, actor_id = user_id, "Rejected swap request");
    decision_response(&transition)
}

/// Lists the requests the actor still has to act on.
///
/// These are the open requests not yet approved by the manager, on shifts
/// the actor manages or offered to the actor.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn pending_swaps(
    persistence: &mut Persistence,
    actor: &User,
) -> Result<PendingSwapsResponse, ApiError> {
    let requests: Vec<ShiftSwapRequest> = persistence
        .list_pending_swaps(actor_id(actor)?)
        .map_err(store_error("Swap request"))?;
    Ok(PendingSwapsResponse {
        requests: to_infos(&requests)?,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dual-approval state machine for shift swaps.
//!
//! Every transition is a pure function from the current request and shift
//! to a [`SwapTransition`] describing what must be persisted. Nothing here
//! touches storage; serializing concurrent transitions is the store's job.

use crate::error::CoreError;
use flexirota_domain::{DomainError, Shift, ShiftSwapRequest, User};
use time::OffsetDateTime;

/// Which stakeholder of a swap an acting user represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapParty {
    /// The manager who owns the shift.
    Manager,
    /// The employee who would receive the shift.
    Recipient,
    /// A user who is both. Only reachable with unusual data.
    Both,
}

impl SwapParty {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Recipient => "recipient",
            Self::Both => "both",
        }
    }
}

/// What a transition did to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The request is still open and needs approval from `waiting_on`.
    Partial {
        /// The party whose approval is still missing.
        waiting_on: SwapParty,
    },
    /// Both parties approved and the shift changed hands.
    Completed,
    /// The request was rejected.
    Rejected,
}

/// The result of applying a swap transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapTransition {
    /// The request as it must now be stored.
    pub request: ShiftSwapRequest,
    /// The shift as it must now be stored, when the transition changed it.
    pub shift: Option<Shift>,
    pub outcome: SwapOutcome,
}

fn check_shift_matches(request: &ShiftSwapRequest, shift: &Shift) -> Result<(), CoreError> {
    if shift.shift_id != Some(request.shift_id) {
        return Err(CoreError::Internal(format!(
            "Swap request refers to shift {} but shift {:?} was supplied",
            request.shift_id, shift.shift_id
        )));
    }
    Ok(())
}

fn request_id(request: &ShiftSwapRequest) -> Result<i64, CoreError> {
    request.request_id.ok_or_else(|| {
        CoreError::DomainViolation(DomainError::MissingIdentifier {
            entity: "ShiftSwapRequest",
        })
    })
}

const fn waiting_on(request: &ShiftSwapRequest) -> SwapParty {
    match (request.manager_approved, request.recipient_approved) {
        (true, _) => SwapParty::Recipient,
        (false, true) => SwapParty::Manager,
        (false, false) => SwapParty::Both,
    }
}

/// Determines which party `actor_id` acts as for this request.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor is neither the shift's
/// manager nor the request's recipient.
pub fn resolve_party(
    request: &ShiftSwapRequest,
    shift: &Shift,
    actor_id: i64,
) -> Result<SwapParty, CoreError> {
    let is_manager: bool = shift.manager_id == actor_id;
    let is_recipient: bool = request.requested_to == actor_id;
    match (is_manager, is_recipient) {
        (true, true) => Ok(SwapParty::Both),
        (true, false) => Ok(SwapParty::Manager),
        (false, true) => Ok(SwapParty::Recipient),
        (false, false) => Err(CoreError::Forbidden {
            action: String::from("act on swap request"),
            reason: format!(
                "user {actor_id} is neither the shift's manager nor the swap recipient"
            ),
        }),
    }
}

/// Opens a swap request for `shift` from its current holder to `recipient`.
///
/// The returned transition carries the new request (unsaved) and the shift
/// marked as swap-requested.
///
/// # Arguments
///
/// * `shift` - The shift being handed over
/// * `requester` - The acting user, who must currently hold the shift
/// * `recipient` - The employee who would take the shift
/// * `organisation_id` - The organisation of the shift's manager
/// * `reason` - Optional free text
/// * `now` - The request timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The requester does not hold the shift
/// - The recipient is the requester
/// - The recipient is not an employee of `organisation_id`
/// - The shift already has an outstanding request
pub fn request_swap(
    shift: &Shift,
    requester: &User,
    recipient: &User,
    organisation_id: i64,
    reason: Option<String>,
    now: OffsetDateTime,
) -> Result<SwapTransition, CoreError> {
    let shift_id: i64 = shift
        .shift_id
        .ok_or(DomainError::MissingIdentifier { entity: "Shift" })?;
    let requester_id: i64 = requester.id()?;
    let recipient_id: i64 = recipient.id()?;

    if shift.employee_id != requester_id {
        return Err(CoreError::Forbidden {
            action: String::from("request swap"),
            reason: format!("user {requester_id} is not assigned to shift {shift_id}"),
        });
    }
    if recipient_id == requester_id {
        return Err(DomainError::SelfSwap {
            user_id: requester_id,
        }
        .into());
    }
    if !recipient.is_employee() {
        return Err(DomainError::NotAnEmployee {
            user_id: recipient_id,
        }
        .into());
    }
    if recipient.organisation_id != Some(organisation_id) {
        return Err(DomainError::CrossOrganisation {
            user_id: recipient_id,
            organisation_id,
        }
        .into());
    }
    if shift.is_swap_requested {
        return Err(CoreError::SwapAlreadyPending { shift_id });
    }

    let request: ShiftSwapRequest =
        ShiftSwapRequest::new(shift_id, requester_id, recipient_id, reason, now);
    let mut updated_shift: Shift = shift.clone();
    updated_shift.is_swap_requested = true;
    updated_shift.swap_approved = false;

    Ok(SwapTransition {
        request,
        shift: Some(updated_shift),
        outcome: SwapOutcome::Partial {
            waiting_on: SwapParty::Both,
        },
    })
}

/// Records `actor_id`'s approval.
///
/// Approving again as the same party changes nothing. When both approvals
/// are present the request becomes approved and the shift is reassigned to
/// the recipient.
///
/// # Errors
///
/// Returns an error if:
/// - `shift` is not the request's shift
/// - The actor is neither the manager nor the recipient
/// - The request is already approved or rejected
pub fn approve(
    request: &ShiftSwapRequest,
    shift: &Shift,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<SwapTransition, CoreError> {
    let request_id: i64 = request_id(request)?;
    check_shift_matches(request, shift)?;
    let party: SwapParty = resolve_party(request, shift, actor_id)?;
    if request.is_resolved() {
        return Err(CoreError::SwapAlreadyResolved { request_id });
    }

    let mut updated: ShiftSwapRequest = request.clone();
    match party {
        SwapParty::Manager => updated.manager_approved = true,
        SwapParty::Recipient => updated.recipient_approved = true,
        SwapParty::Both => {
            updated.manager_approved = true;
            updated.recipient_approved = true;
        }
    }

    if !(updated.manager_approved && updated.recipient_approved) {
        let waiting: SwapParty = waiting_on(&updated);
        return Ok(SwapTransition {
            request: updated,
            shift: None,
            outcome: SwapOutcome::Partial {
                waiting_on: waiting,
            },
        });
    }

    updated.is_approved = true;
    updated.approved_at = Some(now);

    let mut updated_shift: Shift = shift.clone();
    updated_shift.employee_id = updated.requested_to;
    updated_shift.swap_approved = true;
    updated_shift.is_swap_requested = false;

    Ok(SwapTransition {
        request: updated,
        shift: Some(updated_shift),
        outcome: SwapOutcome::Completed,
    })
}

/// Rejects the request on behalf of `actor_id`.
///
/// All approvals are cleared and the shift's swap flags are reset. The
/// request is kept and stamped with `rejected_at`, which makes it terminal.
///
/// # Errors
///
/// Returns an error if:
/// - `shift` is not the request's shift
/// - The actor is neither the manager nor the recipient
/// - The request is already approved or rejected
pub fn reject(
    request: &ShiftSwapRequest,
    shift: &Shift,
    actor_id: i64,
    now: OffsetDateTime,
) -> Result<SwapTransition, CoreError> {
    let request_id: i64 = request_id(request)?;
    check_shift_matches(request, shift)?;
    resolve_party(request, shift, actor_id)?;
    if request.is_resolved() {
        return Err(CoreError::SwapAlreadyResolved { request_id });
    }

    let mut updated: ShiftSwapRequest = request.clone();
    updated.manager_approved = false;
    updated.recipient_approved = false;
    updated.is_approved = false;
    updated.approved_at = None;
    updated.rejected_at = Some(now);

    let mut updated_shift: Shift = shift.clone();
    updated_shift.swap_approved = false;
    updated_shift.is_swap_requested = false;

    Ok(SwapTransition {
        request: updated,
        shift: Some(updated_shift),
        outcome: SwapOutcome::Rejected,
    })
}

/// Whether `request` belongs in `user_id`'s pending list.
///
/// A request is pending while it is neither approved nor rejected and the
/// manager has not yet approved it. It is visible to the shift's manager
/// and to the recipient. The store's pending-list query filters on the
/// same predicate.
#[must_use]
pub const fn is_pending_for(request: &ShiftSwapRequest, shift: &Shift, user_id: i64) -> bool {
    !request.is_approved
        && !request.manager_approved
        && !request.is_rejected()
        && (shift.manager_id == user_id || request.requested_to == user_id)
}

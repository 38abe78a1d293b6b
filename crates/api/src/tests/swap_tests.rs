// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the swap workflow.

use flexirota_domain::{Shift, User};

use super::helpers::{World, create_test_now, register};
use crate::error::ApiError;
use crate::policy::AssignmentPolicy;
use crate::{
    RequestSwapRequest, ShiftInfo, SwapDecisionResponse, SwapRequestInfo, SwapStatus,
    approve_swap, pending_swaps, reject_swap, request_swap,
};

/// Alice holds a shift and Bob is a fellow server.
struct Swap {
    world: World,
    alice: User,
    bob: User,
    shift: ShiftInfo,
}

impl Swap {
    fn create() -> Self {
        let mut world: World = World::create();
        let alice: User = world.hire("alice", &world.server.clone());
        let bob: User = world.hire("bob", &world.server.clone());
        let shift: ShiftInfo = world.shift(&alice, 12, 8);
        Self {
            world,
            alice,
            bob,
            shift,
        }
    }

    fn offer(&mut self, reason: Option<&str>) -> Result<SwapRequestInfo, ApiError> {
        request_swap(
            &mut self.world.persistence,
            &self.alice,
            &RequestSwapRequest {
                shift_id: self.shift.shift_id,
                requested_to: self.bob.user_id.unwrap(),
                reason: reason.map(String::from),
            },
            create_test_now(),
        )
    }

    fn approve(&mut self, actor: &User, request_id: i64) -> Result<SwapDecisionResponse, ApiError> {
        approve_swap(
            &mut self.world.persistence,
            actor,
            request_id,
            &AssignmentPolicy::default(),
            create_test_now(),
        )
    }

    fn reject(&mut self, actor: &User, request_id: i64) -> Result<SwapDecisionResponse, ApiError> {
        reject_swap(
            &mut self.world.persistence,
            actor,
            request_id,
            &AssignmentPolicy::default(),
            create_test_now(),
        )
    }

    fn stored_shift(&mut self) -> Shift {
        self.world.persistence.get_shift(self.shift.shift_id).unwrap()
    }
}

#[test]
fn test_request_marks_the_shift() {
    let mut swap: Swap = Swap::create();

    let request: SwapRequestInfo = swap.offer(Some("  dentist  ")).unwrap();

    assert_eq!(request.state, "Requested");
    assert_eq!(request.reason.as_deref(), Some("dentist"));
    assert!(!request.manager_approved && !request.recipient_approved);
    assert!(swap.stored_shift().is_swap_requested);
}

#[test]
fn test_blank_reason_is_dropped() {
    let mut swap: Swap = Swap::create();

    assert_eq!(swap.offer(Some("   ")).unwrap().reason, None);
}

#[test]
fn test_only_the_holder_may_offer_a_shift() {
    let mut swap: Swap = Swap::create();
    let (bob, alice): (User, User) = (swap.bob.clone(), swap.alice.clone());

    let result = request_swap(
        &mut swap.world.persistence,
        &bob,
        &RequestSwapRequest {
            shift_id: swap.shift.shift_id,
            requested_to: alice.user_id.unwrap(),
            reason: None,
        },
        create_test_now(),
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_recipient_must_be_a_colleague() {
    let mut swap: Swap = Swap::create();
    let outsider: User = register(&mut swap.world.persistence, "outsider", "employee");
    let alice: User = swap.alice.clone();
    let offer_to = |swap: &mut Swap, recipient: i64| {
        request_swap(
            &mut swap.world.persistence,
            &alice,
            &RequestSwapRequest {
                shift_id: swap.shift.shift_id,
                requested_to: recipient,
                reason: None,
            },
            create_test_now(),
        )
    };

    let to_self = offer_to(&mut swap, alice.user_id.unwrap());
    let to_outsider = offer_to(&mut swap, outsider.user_id.unwrap());
    let to_nobody = offer_to(&mut swap, 999);

    assert!(matches!(
        to_self,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "distinct_swap_parties"
    ));
    assert!(matches!(
        to_outsider,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "same_organisation"
    ));
    assert!(matches!(to_nobody, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_second_request_for_a_shift_conflicts() {
    let mut swap: Swap = Swap::create();
    swap.offer(None).unwrap();

    assert!(matches!(swap.offer(None), Err(ApiError::Conflict { .. })));
}

#[test]
fn test_manager_then_recipient_completes_the_swap() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let (manager, bob): (User, User) = (swap.world.manager.clone(), swap.bob.clone());

    let first: SwapDecisionResponse = swap.approve(&manager, request_id).unwrap();
    assert_eq!(first.status, SwapStatus::Partial);
    assert_eq!(first.waiting_on.as_deref(), Some("recipient"));
    assert!(first.request.manager_approved);
    assert_eq!(swap.stored_shift().employee_id, swap.alice.user_id.unwrap());

    let second: SwapDecisionResponse = swap.approve(&bob, request_id).unwrap();
    assert_eq!(second.status, SwapStatus::Completed);
    assert_eq!(second.waiting_on, None);
    assert!(second.request.is_approved);
    assert_eq!(second.request.state, "Approved");
    assert!(second.request.approved_at.is_some());

    let shift: Shift = swap.stored_shift();
    assert_eq!(shift.employee_id, bob.user_id.unwrap());
    assert!(shift.swap_approved);
    assert!(!shift.is_swap_requested);
}

#[test]
fn test_recipient_then_manager_completes_the_swap() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let (manager, bob): (User, User) = (swap.world.manager.clone(), swap.bob.clone());

    let first: SwapDecisionResponse = swap.approve(&bob, request_id).unwrap();
    assert_eq!(first.waiting_on.as_deref(), Some("manager"));

    let second: SwapDecisionResponse = swap.approve(&manager, request_id).unwrap();
    assert_eq!(second.status, SwapStatus::Completed);
    assert_eq!(swap.stored_shift().employee_id, bob.user_id.unwrap());
}

#[test]
fn test_repeated_approval_changes_nothing() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let manager: User = swap.world.manager.clone();

    let first: SwapDecisionResponse = swap.approve(&manager, request_id).unwrap();
    let again: SwapDecisionResponse = swap.approve(&manager, request_id).unwrap();

    assert_eq!(again.status, SwapStatus::Partial);
    assert_eq!(again.request, first.request);
}

#[test]
fn test_reject_after_partial_approval_clears_everything() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let (manager, bob): (User, User) = (swap.world.manager.clone(), swap.bob.clone());
    swap.approve(&manager, request_id).unwrap();

    let rejected: SwapDecisionResponse = swap.reject(&bob, request_id).unwrap();

    assert_eq!(rejected.status, SwapStatus::Rejected);
    assert_eq!(rejected.request.state, "Rejected");
    assert!(!rejected.request.manager_approved && !rejected.request.recipient_approved);
    assert!(rejected.request.rejected_at.is_some());
    let shift: Shift = swap.stored_shift();
    assert_eq!(shift.employee_id, swap.alice.user_id.unwrap());
    assert!(!shift.is_swap_requested);

    // The shift can be offered again once the earlier request is closed.
    assert!(swap.offer(None).is_ok());
}

#[test]
fn test_resolved_requests_cannot_be_decided_again() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let (manager, bob): (User, User) = (swap.world.manager.clone(), swap.bob.clone());
    swap.approve(&manager, request_id).unwrap();
    swap.approve(&bob, request_id).unwrap();

    assert!(matches!(
        swap.approve(&manager, request_id),
        Err(ApiError::Conflict { .. })
    ));
    assert!(matches!(swap.reject(&bob, request_id), Err(ApiError::Conflict { .. })));
}

#[test]
fn test_bystanders_cannot_decide() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let carol: User = swap.world.hire("carol", &swap.world.server.clone());
    let alice: User = swap.alice.clone();

    assert!(matches!(
        swap.approve(&carol, request_id),
        Err(ApiError::Forbidden { .. })
    ));
    assert!(matches!(
        swap.approve(&alice, request_id),
        Err(ApiError::Forbidden { .. })
    ));
    assert!(matches!(swap.reject(&carol, request_id), Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_bystanders_are_forbidden_after_the_swap_completes() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let (manager, bob, alice): (User, User, User) =
        (swap.world.manager.clone(), swap.bob.clone(), swap.alice.clone());
    swap.approve(&manager, request_id).unwrap();
    swap.approve(&bob, request_id).unwrap();
    let carol: User = swap.world.hire("carol", &swap.world.server.clone());

    assert!(matches!(
        swap.approve(&carol, request_id),
        Err(ApiError::Forbidden { .. })
    ));
    assert!(matches!(swap.reject(&alice, request_id), Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_unknown_request_is_not_found() {
    let mut swap: Swap = Swap::create();
    let manager: User = swap.world.manager.clone();

    assert!(matches!(
        swap.approve(&manager, 999),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_pending_lists_follow_the_approvals() {
    let mut swap: Swap = Swap::create();
    let request_id: i64 = swap.offer(None).unwrap().request_id;
    let (manager, bob, alice): (User, User, User) =
        (swap.world.manager.clone(), swap.bob.clone(), swap.alice.clone());
    let pending_for = |swap: &mut Swap, user: &User| -> Vec<i64> {
        pending_swaps(&mut swap.world.persistence, user)
            .unwrap()
            .requests
            .iter()
            .map(|r| r.request_id)
            .collect()
    };

    assert_eq!(pending_for(&mut swap, &manager), vec![request_id]);
    assert_eq!(pending_for(&mut swap, &bob), vec![request_id]);
    assert!(pending_for(&mut swap, &alice).is_empty());

    // Once the manager has approved, the request leaves both lists.
    swap.approve(&manager, request_id).unwrap();
    assert!(pending_for(&mut swap, &manager).is_empty());
    assert!(pending_for(&mut swap, &bob).is_empty());
}

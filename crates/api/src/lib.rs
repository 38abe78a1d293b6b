// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for FlexiRota.
//!
//! This crate sits between transport and the core. It resolves the acting
//! user, enforces who may do what, drives the assignment engine and the
//! swap state machine against the persistence layer, and translates every
//! lower-level error into an `ApiError`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    approve_swap, auto_assign, create_availability, create_organisation, create_role,
    create_shift, create_shift_template, delete_availability, delete_shift,
    delete_shift_template, get_user, list_availability, list_roles, list_shift_templates,
    list_shifts, list_users, pending_swaps, register_user, reject_swap, request_swap,
    update_shift, update_user,
};
pub use policy::{AssignmentPolicy, MAX_CONFLICT_RETRIES, MAX_WORKLOAD_WINDOW_DAYS, PolicyError};
pub use request_response::{
    AutoAssignResponse, AvailabilityInfo, CreateAvailabilityRequest, CreateOrganisationRequest,
    CreateRoleRequest, CreateShiftRequest, CreateShiftTemplateRequest, ListAvailabilityResponse,
    ListRolesResponse, ListShiftTemplatesResponse, ListShiftsResponse, ListUsersResponse,
    OrganisationInfo, PendingSwapsResponse, RegisterUserRequest, RequestSwapRequest,
    RequirementInfo, RequirementRequest, RoleInfo, ShiftInfo, ShiftTemplateInfo,
    SwapDecisionResponse, SwapRequestInfo, SwapStatus, UpdateShiftRequest, UpdateUserRequest,
    UserInfo,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

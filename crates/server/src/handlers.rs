// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route handlers.
//!
//! Each handler resolves the acting user, takes the persistence lock for
//! one API call, and maps the result to a status code and JSON body.

use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use flexirota_api::{
    AutoAssignResponse, AvailabilityInfo, CreateAvailabilityRequest, CreateOrganisationRequest,
    CreateRoleRequest, CreateShiftRequest, CreateShiftTemplateRequest, ListAvailabilityResponse,
    ListRolesResponse, ListShiftTemplatesResponse, ListShiftsResponse, ListUsersResponse,
    OrganisationInfo, PendingSwapsResponse, RegisterUserRequest, RequestSwapRequest, RoleInfo,
    ShiftInfo, ShiftTemplateInfo, SwapDecisionResponse, SwapRequestInfo, UpdateShiftRequest,
    UpdateUserRequest, UserInfo, approve_swap, auto_assign, create_availability,
    create_organisation, create_role, create_shift, create_shift_template, delete_availability,
    delete_shift, delete_shift_template, get_user, list_availability, list_roles,
    list_shift_templates, list_shifts, list_users, pending_swaps, register_user, reject_swap,
    request_swap, update_shift, update_user,
};
use tracing::info;

use crate::AppState;
use crate::error::HttpError;
use crate::session::ActingUser;

type Created<T> = (StatusCode, Json<T>);

// ============================================================================
// Organisations and users
// ============================================================================

/// Handler for POST `/organisations`.
pub async fn handle_create_organisation(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateOrganisationRequest>,
) -> Result<Created<OrganisationInfo>, HttpError> {
    info!(actor_id = actor.user_id, name = %req.name, "Handling create_organisation request");

    let mut persistence = app_state.persistence.lock().await;
    let organisation: OrganisationInfo =
        create_organisation(&mut persistence, &actor, &req, app_state.clock.now())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(organisation)))
}

/// Handler for POST `/roles`.
pub async fn handle_create_role(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Created<RoleInfo>, HttpError> {
    info!(actor_id = actor.user_id, name = %req.name, "Handling create_role request");

    let mut persistence = app_state.persistence.lock().await;
    let role: RoleInfo = create_role(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(role)))
}

/// Handler for GET `/roles`.
pub async fn handle_list_roles(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<ListRolesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListRolesResponse = list_roles(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/users`.
///
/// Registration is the one route without an acting user.
pub async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Created<UserInfo>, HttpError> {
    info!(username = %req.username, role = %req.role, "Handling register_user request");

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = register_user(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for GET `/users`.
pub async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_users(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}`.
pub async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = get_user(&mut persistence, &actor, user_id)?;
    drop(persistence);

    Ok(Json(user))
}

/// Handler for PATCH `/users/{user_id}`.
pub async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(actor_id = actor.user_id, user_id, "Handling update_user request");

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = update_user(&mut persistence, &actor, user_id, &req)?;
    drop(persistence);

    Ok(Json(user))
}

// ============================================================================
// Templates and shifts
// ============================================================================

/// Handler for POST `/shift_templates`.
pub async fn handle_create_shift_template(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateShiftTemplateRequest>,
) -> Result<Created<ShiftTemplateInfo>, HttpError> {
    info!(
        actor_id = actor.user_id,
        requirements = req.requirements.len(),
        "Handling create_shift_template request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let template: ShiftTemplateInfo = create_shift_template(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(template)))
}

/// Handler for GET `/shift_templates`.
pub async fn handle_list_shift_templates(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<ListShiftTemplatesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListShiftTemplatesResponse = list_shift_templates(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/shift_templates/{template_id}`.
pub async fn handle_delete_shift_template(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(template_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = actor.user_id, template_id, "Handling delete_shift_template request");

    let mut persistence = app_state.persistence.lock().await;
    delete_shift_template(&mut persistence, &actor, template_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/shifts`.
pub async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateShiftRequest>,
) -> Result<Created<ShiftInfo>, HttpError> {
    info!(
        actor_id = actor.user_id,
        employee_id = req.employee_id,
        "Handling create_shift request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let shift: ShiftInfo = create_shift(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for GET `/shifts`.
pub async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListShiftsResponse = list_shifts(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/shifts/{shift_id}`.
pub async fn handle_update_shift(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(shift_id): Path<i64>,
    Json(req): Json<UpdateShiftRequest>,
) -> Result<Json<ShiftInfo>, HttpError> {
    info!(actor_id = actor.user_id, shift_id, "Handling update_shift request");

    let mut persistence = app_state.persistence.lock().await;
    let shift: ShiftInfo = update_shift(&mut persistence, &actor, shift_id, &req)?;
    drop(persistence);

    Ok(Json(shift))
}

/// Handler for DELETE `/shifts/{shift_id}`.
pub async fn handle_delete_shift(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(shift_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(actor_id = actor.user_id, shift_id, "Handling delete_shift request");

    let mut persistence = app_state.persistence.lock().await;
    delete_shift(&mut persistence, &actor, shift_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/shifts/auto_assign`.
///
/// Staffs the acting manager's open templates with the server's policy.
pub async fn handle_auto_assign(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<AutoAssignResponse>, HttpError> {
    info!(actor_id = actor.user_id, "Handling auto_assign request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AutoAssignResponse = auto_assign(
        &mut persistence,
        &actor,
        &app_state.policy,
        app_state.clock.now(),
    )?;
    drop(persistence);

    info!(created = response.created.len(), "Auto-assign request succeeded");
    Ok(Json(response))
}

// ============================================================================
// Swaps
// ============================================================================

/// Handler for POST `/swaps/request`.
pub async fn handle_request_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<RequestSwapRequest>,
) -> Result<Created<SwapRequestInfo>, HttpError> {
    info!(
        actor_id = actor.user_id,
        shift_id = req.shift_id,
        requested_to = req.requested_to,
        "Handling request_swap request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let request: SwapRequestInfo =
        request_swap(&mut persistence, &actor, &req, app_state.clock.now())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(request)))
}

/// Handler for PATCH `/swaps/approve/{request_id}`.
pub async fn handle_approve_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(request_id): Path<i64>,
) -> Result<Json<SwapDecisionResponse>, HttpError> {
    info!(actor_id = actor.user_id, request_id, "Handling approve_swap request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SwapDecisionResponse = approve_swap(
        &mut persistence,
        &actor,
        request_id,
        &app_state.policy,
        app_state.clock.now(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/swaps/reject/{request_id}`.
pub async fn handle_reject_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(request_id): Path<i64>,
) -> Result<Json<SwapDecisionResponse>, HttpError> {
    info!(actor_id = actor.user_id, request_id, "Handling reject_swap request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SwapDecisionResponse = reject_swap(
        &mut persistence,
        &actor,
        request_id,
        &app_state.policy,
        app_state.clock.now(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/swaps/pending`.
pub async fn handle_pending_swaps(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<PendingSwapsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: PendingSwapsResponse = pending_swaps(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Availability
// ============================================================================

/// Handler for POST `/availability`.
pub async fn handle_create_availability(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateAvailabilityRequest>,
) -> Result<Created<AvailabilityInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let window: AvailabilityInfo = create_availability(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(window)))
}

/// Handler for GET `/availability`.
pub async fn handle_list_availability(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
) -> Result<Json<ListAvailabilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListAvailabilityResponse = list_availability(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/availability/{availability_id}`.
pub async fn handle_delete_availability(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(availability_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_availability(&mut persistence, &actor, availability_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota_domain::{
    Role, RoleRequirement, Shift, ShiftTemplate, TimeRange, User, validate_shift_template,
};
use flexirota_persistence::Persistence;
use tracing::{info, warn};

use super::{actor_id, require_employee_of, store_error, time_range, to_infos};
use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CreateShiftRequest, CreateShiftTemplateRequest, ListShiftTemplatesResponse,
    ListShiftsResponse, RequirementRequest, ShiftInfo, ShiftTemplateInfo, UpdateShiftRequest,
};

fn resolve_requirement(
    persistence: &mut Persistence,
    organisation_id: i64,
    requirement: &RequirementRequest,
) -> Result<RoleRequirement, ApiError> {
    let role: Role = persistence
        .get_role(requirement.role_id)
        .map_err(store_error("Role"))?;
    if role.organisation_id() != organisation_id {
        return Err(ApiError::InvalidInput {
            field: String::from("requirements"),
            message: format!(
                "Role {} belongs to another organisation",
                requirement.role_id
            ),
        });
    }
    Ok(RoleRequirement::new(
        requirement.role_id,
        role.name().to_string(),
        requirement.quantity,
    ))
}

/// Creates an open shift template owned by the acting manager.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a manager of an organisation
/// - The time range is empty or reversed
/// - A role is unknown or belongs to another organisation
/// - No requirement is given, a quantity is zero, or a role repeats
pub fn create_shift_template(
    persistence: &mut Persistence,
    actor: &User,
    request: &CreateShiftTemplateRequest,
) -> Result<ShiftTemplateInfo, ApiError> {
    let organisation_id: i64 =
        AuthorizationService::require_manager(actor, "create_shift_template")?;
    let manager_id: i64 = actor_id(actor)?;
    let range: TimeRange = time_range(request.start_time, request.end_time)?;

    let requirements: Vec<RoleRequirement> = request
        .requirements
        .iter()
        .map(|r| resolve_requirement(persistence, organisation_id, r))
        .collect::<Result<Vec<RoleRequirement>, ApiError>>()?;
    let template: ShiftTemplate = ShiftTemplate::new(manager_id, range, requirements);
    validate_shift_template(&template).map_err(translate_domain_error)?;

    let saved: ShiftTemplate = persistence
        .create_shift_template(&template)
        .map_err(store_error("Shift template"))?;
    ShiftTemplateInfo::try_from(&saved)
}

/// Lists the acting manager's open templates in creation order.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or the query fails.
pub fn list_shift_templates(
    persistence: &mut Persistence,
    actor: &User,
) -> Result<ListShiftTemplatesResponse, ApiError> {
    AuthorizationService::require_manager(actor, "list_shift_templates")?;
    let templates: Vec<ShiftTemplate> = persistence
        .list_shift_templates_by_manager(actor_id(actor)?)
        .map_err(store_error("Shift template"))?;
    Ok(ListShiftTemplatesResponse {
        templates: to_infos(&templates)?,
    })
}

/// Deletes one of the acting manager's templates.
///
/// # Errors
///
/// Returns an error if the template does not exist or is not the actor's.
pub fn delete_shift_template(
    persistence: &mut Persistence,
    actor: &User,
    template_id: i64,
) -> Result<(), ApiError> {
    let action: &str = "delete_shift_template";
    AuthorizationService::require_manager(actor, action)?;
    let template: ShiftTemplate = persistence
        .get_shift_template(template_id)
        .map_err(store_error("Shift template"))?;
    AuthorizationService::require_template_owner(actor, &template, action)?;

    persistence
        .delete_shift_template(template_id)
        .map_err(store_error("Shift template"))
}

/// Creates a shift for an employee of the acting manager's organisation.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the employee does not
/// exist or is not an employee of the organisation, or the time range is
/// invalid.
pub fn create_shift(
    persistence: &mut Persistence,
    actor: &User,
    request: &CreateShiftRequest,
) -> Result<ShiftInfo, ApiError> {
    let organisation_id: i64 = AuthorizationService::require_manager(actor, "create_shift")?;
    let employee: User = persistence
        .get_user(request.employee_id)
        .map_err(store_error("User"))?;
    require_employee_of(&employee, organisation_id)?;
    let range: TimeRange = time_range(request.start_time, request.end_time)?;

    let saved: Shift = persistence
        .create_shift(&Shift::new(request.employee_id, actor_id(actor)?, range))
        .map_err(store_error("Shift"))?;
    ShiftInfo::try_from(&saved)
}

/// Lists the actor's shifts: those a manager owns, or those an employee works.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shifts(
    persistence: &mut Persistence,
    actor: &User,
) -> Result<ListShiftsResponse, ApiError> {
    let user_id: i64 = actor_id(actor)?;
    let shifts: Vec<Shift> = if actor.is_manager() {
        persistence.list_shifts_by_manager(user_id)
    } else {
        persistence.list_shifts_by_employee(user_id)
    }
    .map_err(store_error("Shift"))?;

    Ok(ListShiftsResponse {
        shifts: to_infos(&shifts)?,
    })
}

/// Edits one of the acting manager's shifts.
///
/// A shift with a pending swap request cannot be handed to someone else
/// until the request is resolved.
///
/// # Errors
///
/// Returns an error if the shift does not exist or is not the actor's, the
/// new employee is not eligible, the new time range is invalid, or the
/// reassignment would bypass a pending swap.
pub fn update_shift(
    persistence: &mut Persistence,
    actor: &User,
    shift_id: i64,
    request: &UpdateShiftRequest,
) -> Result<ShiftInfo, ApiError> {
    let action: &str = "update_shift";
    let organisation_id: i64 = AuthorizationService::require_manager(actor, action)?;
    let mut shift: Shift = persistence.get_shift(shift_id).map_err(store_error("Shift"))?;
    AuthorizationService::require_shift_manager(actor, &shift, action)?;

    if let Some(employee_id) = request.employee_id.filter(|id| *id != shift.employee_id) {
        if shift.is_swap_requested {
            warn!(shift_id, employee_id, "Refused to reassign shift with pending swap");
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("pending_swap"),
                message: format!(
                    "Shift {shift_id} has a pending swap request; resolve it before reassigning"
                ),
            });
        }
        let employee: User = persistence
            .get_user(employee_id)
            .map_err(store_error("User"))?;
        require_employee_of(&employee, organisation_id)?;
        shift.employee_id = employee_id;
    }

    shift.time_range = time_range(
        request.start_time.unwrap_or_else(|| shift.time_range.start()),
        request.end_time.unwrap_or_else(|| shift.time_range.end()),
    )?;

    let stored: Shift = persistence.update_shift(&shift).map_err(store_error("Shift"))?;
    info!(shift_id, employee_id = stored.employee_id, "Updated shift");
    ShiftInfo::try_from(&stored)
}

/// Deletes one of the acting manager's shifts. Its swap requests go with it.
///
/// # Errors
///
/// Returns an error if the shift does not exist or is not the actor's.
pub fn delete_shift(
    persistence: &mut Persistence,
    actor: &User,
    shift_id: i64,
) -> Result<(), ApiError> {
    let action: &str = "delete_shift";
    AuthorizationService::require_manager(actor, action)?;
    let shift: Shift = persistence.get_shift(shift_id).map_err(store_error("Shift"))?;
    AuthorizationService::require_shift_manager(actor, &shift, action)?;

    persistence.delete_shift(shift_id).map_err(store_error("Shift"))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota_domain::{
    Organisation, Role, User, UserRole, validate_name, validate_user_fields,
};
use flexirota_persistence::Persistence;
use time::OffsetDateTime;
use tracing::info;

use super::{store_error, to_infos};
use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CreateOrganisationRequest, CreateRoleRequest, ListRolesResponse, ListUsersResponse,
    OrganisationInfo, RegisterUserRequest, RoleInfo, UpdateUserRequest, UserInfo,
};

/// Creates an organisation and makes the acting manager its manager.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The acting user, who must be a manager without an organisation
/// * `request` - The organisation to create
/// * `now` - The creation time
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a manager
/// - The actor already belongs to an organisation
/// - The name is blank
/// - Persistence fails
pub fn create_organisation(
    persistence: &mut Persistence,
    actor: &User,
    request: &CreateOrganisationRequest,
    now: OffsetDateTime,
) -> Result<OrganisationInfo, ApiError> {
    if !actor.is_manager() {
        return Err(ApiError::Forbidden {
            action: String::from("create_organisation"),
            reason: String::from("only managers may do this"),
        });
    }
    if let Some(existing) = actor.organisation_id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("single_organisation"),
            message: format!("You already belong to organisation {existing}"),
        });
    }
    validate_name(&request.name).map_err(translate_domain_error)?;

    let organisation: Organisation = persistence
        .create_organisation(&Organisation::new(request.name.trim().to_string(), now))
        .map_err(store_error("Organisation"))?;
    let info: OrganisationInfo = OrganisationInfo::try_from(&organisation)?;

    let mut manager: User = actor.clone();
    manager.organisation_id = Some(info.organisation_id);
    persistence
        .update_user(&manager)
        .map_err(store_error("User"))?;

    info!(
        organisation_id = info.organisation_id,
        manager_id = manager.user_id,
        "Created organisation"
    );
    Ok(info)
}

/// Creates a role in the acting manager's organisation.
///
/// # Errors
///
/// Returns an error if the actor is not a manager of an organisation, the
/// name is blank, or the name is already used in the organisation.
pub fn create_role(
    persistence: &mut Persistence,
    actor: &User,
    request: &CreateRoleRequest,
) -> Result<RoleInfo, ApiError> {
    let organisation_id: i64 = AuthorizationService::require_manager(actor, "create_role")?;
    validate_name(&request.name).map_err(translate_domain_error)?;

    let role: Role = persistence
        .create_role(&Role::new(organisation_id, request.name.trim().to_string()))
        .map_err(store_error("Role"))?;

    info!(organisation_id, role_id = role.role_id(), "Created role");
    RoleInfo::try_from(&role)
}

/// Lists the roles of the actor's organisation.
///
/// # Errors
///
/// Returns an error if the actor has no organisation or the query fails.
pub fn list_roles(
    persistence: &mut Persistence,
    actor: &User,
) -> Result<ListRolesResponse, ApiError> {
    let organisation_id: i64 = AuthorizationService::require_organisation(actor, "list_roles")?;
    let roles: Vec<Role> = persistence
        .list_roles(organisation_id)
        .map_err(store_error("Role"))?;
    Ok(ListRolesResponse {
        roles: to_infos(&roles)?,
    })
}

/// Registers a new user outside any organisation.
///
/// This is the only operation without an acting user.
///
/// # Errors
///
/// Returns an error if the role is unknown, the name or username is
/// invalid, or the username is already taken.
pub fn register_user(
    persistence: &mut Persistence,
    request: &RegisterUserRequest,
) -> Result<UserInfo, ApiError> {
    let role: UserRole = request.role.parse().map_err(translate_domain_error)?;
    let mut user: User = User::new(request.username.clone(), request.name.clone(), role);
    user.email = request.email.clone();
    user.phone_number = request.phone_number.clone();
    validate_user_fields(&user).map_err(translate_domain_error)?;

    let saved: User = persistence.create_user(&user).map_err(store_error("User"))?;

    info!(
        user_id = saved.user_id,
        username = %saved.username,
        role = saved.role.as_str(),
        "Registered user"
    );
    UserInfo::try_from(&saved)
}

/// Retrieves a user visible to the actor.
///
/// # Errors
///
/// Returns an error if the user does not exist or is in another organisation.
pub fn get_user(
    persistence: &mut Persistence,
    actor: &User,
    user_id: i64,
) -> Result<UserInfo, ApiError> {
    let user: User = persistence.get_user(user_id).map_err(store_error("User"))?;
    AuthorizationService::require_visible(actor, &user, "get_user")?;
    UserInfo::try_from(&user)
}

/// Lists the users of the actor's organisation.
///
/// # Errors
///
/// Returns an error if the actor has no organisation or the query fails.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &User,
) -> Result<ListUsersResponse, ApiError> {
    let organisation_id: i64 = AuthorizationService::require_organisation(actor, "list_users")?;
    let users: Vec<User> = persistence
        .list_users_by_organisation(organisation_id)
        .map_err(store_error("User"))?;
    Ok(ListUsersResponse {
        users: to_infos(&users)?,
    })
}

/// Applies the contact-detail part of an update. Only the user may do this.
fn apply_contact_changes(
    actor: &User,
    user: &mut User,
    request: &UpdateUserRequest,
) -> Result<(), ApiError> {
    if request.name.is_none() && request.email.is_none() && request.phone_number.is_none() {
        return Ok(());
    }
    let user_id: i64 = user.id().map_err(translate_domain_error)?;
    AuthorizationService::require_self(actor, user_id, "update_user_details")?;

    if let Some(name) = &request.name {
        validate_name(name).map_err(translate_domain_error)?;
        user.name = name.trim().to_string();
    }
    if let Some(email) = &request.email {
        user.email = Some(email.clone());
    }
    if let Some(phone_number) = &request.phone_number {
        user.phone_number = Some(phone_number.clone());
    }
    Ok(())
}

/// Applies the management part of an update. Only a manager of the user's
/// organisation may do this; an unaffiliated user may be adopted.
fn apply_management_changes(
    persistence: &mut Persistence,
    actor: &User,
    user: &mut User,
    request: &UpdateUserRequest,
) -> Result<(), ApiError> {
    if request.organisation_id.is_none()
        && request.role_title_id.is_none()
        && request.pay_rate_cents.is_none()
    {
        return Ok(());
    }
    let action: &str = "manage_user";
    let organisation_id: i64 = AuthorizationService::require_manager(actor, action)?;

    if let Some(requested) = request.organisation_id {
        if requested != organisation_id {
            return Err(ApiError::Forbidden {
                action: action.to_string(),
                reason: String::from("you can only add users to your own organisation"),
            });
        }
        if user.organisation_id.is_some_and(|current| current != organisation_id) {
            return Err(ApiError::Forbidden {
                action: action.to_string(),
                reason: String::from("the user belongs to another organisation"),
            });
        }
        user.organisation_id = Some(organisation_id);
    }
    AuthorizationService::require_visible(actor, user, action)?;

    if let Some(role_title_id) = request.role_title_id {
        let role: Role = persistence
            .get_role(role_title_id)
            .map_err(store_error("Role"))?;
        if role.organisation_id() != organisation_id {
            return Err(ApiError::InvalidInput {
                field: String::from("role_title_id"),
                message: format!("Role {role_title_id} belongs to another organisation"),
            });
        }
        user.role_title_id = Some(role_title_id);
    }
    if let Some(pay_rate_cents) = request.pay_rate_cents {
        user.pay_rate_cents = Some(pay_rate_cents);
    }
    Ok(())
}

/// Updates a user.
///
/// Users change their own contact details. Managers adopt users into
/// their organisation and set role titles and pay rates.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The acting user
/// * `user_id` - The user to change
/// * `request` - The fields to change
///
/// # Errors
///
/// Returns an error if the user does not exist, the actor may not make
/// one of the requested changes, or a value is invalid.
pub fn update_user(
    persistence: &mut Persistence,
    actor: &User,
    user_id: i64,
    request: &UpdateUserRequest,
) -> Result<UserInfo, ApiError> {
    let mut user: User = persistence.get_user(user_id).map_err(store_error("User"))?;

    apply_contact_changes(actor, &mut user, request)?;
    apply_management_changes(persistence, actor, &mut user, request)?;

    persistence.update_user(&user).map_err(store_error("User"))?;

    info!(
        user_id,
        actor_id = actor.user_id,
        organisation_id = user.organisation_id,
        role_title_id = user.role_title_id,
        "Updated user"
    );
    UserInfo::try_from(&user)
}

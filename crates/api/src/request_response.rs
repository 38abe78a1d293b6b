// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Saved domain values convert into their `*Info` form with `TryFrom`,
//! which fails only if a value was never persisted.

use flexirota_domain::{
    Availability, DomainError, Organisation, Role, RoleRequirement, Shift, ShiftSwapRequest,
    ShiftTemplate, User,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{ApiError, translate_domain_error};

fn require_id(id: Option<i64>, entity: &'static str) -> Result<i64, ApiError> {
    id.ok_or_else(|| translate_domain_error(DomainError::MissingIdentifier { entity }))
}

// ============================================================================
// Organisations & Roles
// ============================================================================

/// API request to create an organisation managed by the acting manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrganisationRequest {
    /// The organisation's display name.
    pub name: String,
}

/// A stored organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganisationInfo {
    pub organisation_id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<&Organisation> for OrganisationInfo {
    type Error = ApiError;

    fn try_from(organisation: &Organisation) -> Result<Self, Self::Error> {
        Ok(Self {
            organisation_id: require_id(organisation.organisation_id(), "Organisation")?,
            name: organisation.name().to_string(),
            created_at: organisation.created_at(),
        })
    }
}

/// API request to create a role in the acting manager's organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    /// The role name, unique within the organisation.
    pub name: String,
}

/// A stored role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub role_id: i64,
    pub organisation_id: i64,
    pub name: String,
}

impl TryFrom<&Role> for RoleInfo {
    type Error = ApiError;

    fn try_from(role: &Role) -> Result<Self, Self::Error> {
        Ok(Self {
            role_id: require_id(role.role_id(), "Role")?,
            organisation_id: role.organisation_id(),
            name: role.name().to_string(),
        })
    }
}

/// API response listing the roles of an organisation, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRolesResponse {
    pub roles: Vec<RoleInfo>,
}

// ============================================================================
// Users
// ============================================================================

/// API request to register a new user.
///
/// Registration does not place the user in an organisation; a manager
/// does that later with an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// The unique login name.
    pub username: String,
    /// The user's display name.
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Either `manager` or `employee`.
    pub role: String,
}

/// API request to change a user.
///
/// Users may change their own contact details. Managers may adopt a user
/// into their organisation and set the role title and pay rate of users
/// in it. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// The organisation to adopt the user into. Must be the manager's own.
    pub organisation_id: Option<i64>,
    /// The fine-grained role, which must belong to the manager's organisation.
    pub role_title_id: Option<i64>,
    pub pay_rate_cents: Option<u32>,
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Either `manager` or `employee`.
    pub role: String,
    pub role_title_id: Option<i64>,
    pub pay_rate_cents: Option<u32>,
    pub organisation_id: Option<i64>,
}

impl TryFrom<&User> for UserInfo {
    type Error = ApiError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: require_id(user.user_id, "User")?,
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            role: user.role.to_string(),
            role_title_id: user.role_title_id,
            pay_rate_cents: user.pay_rate_cents,
            organisation_id: user.organisation_id,
        })
    }
}

/// API response listing the users of an organisation, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserInfo>,
}

// ============================================================================
// Templates & Shifts
// ============================================================================

/// One role requirement in a template request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRequest {
    pub role_id: i64,
    pub quantity: u32,
}

/// API request to create a shift template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShiftTemplateRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub requirements: Vec<RequirementRequest>,
}

/// A stored role requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementInfo {
    pub requirement_id: i64,
    pub role_id: i64,
    pub role_name: String,
    pub quantity: u32,
}

impl TryFrom<&RoleRequirement> for RequirementInfo {
    type Error = ApiError;

    fn try_from(requirement: &RoleRequirement) -> Result<Self, Self::Error> {
        Ok(Self {
            requirement_id: require_id(requirement.requirement_id, "Role requirement")?,
            role_id: requirement.role_id,
            role_name: requirement.role_name.clone(),
            quantity: requirement.quantity,
        })
    }
}

/// A stored shift template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplateInfo {
    pub template_id: i64,
    pub manager_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub requirements: Vec<RequirementInfo>,
}

impl TryFrom<&ShiftTemplate> for ShiftTemplateInfo {
    type Error = ApiError;

    fn try_from(template: &ShiftTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            template_id: require_id(template.template_id, "Shift template")?,
            manager_id: template.manager_id,
            start_time: template.time_range.start(),
            end_time: template.time_range.end(),
            requirements: template
                .requirements
                .iter()
                .map(RequirementInfo::try_from)
                .collect::<Result<Vec<RequirementInfo>, ApiError>>()?,
        })
    }
}

/// API response listing a manager's open templates in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListShiftTemplatesResponse {
    pub templates: Vec<ShiftTemplateInfo>,
}

/// API request to create a shift directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    pub employee_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

/// API request to edit a shift. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateShiftRequest {
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
}

/// A stored shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInfo {
    pub shift_id: i64,
    pub employee_id: i64,
    pub manager_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub is_swap_requested: bool,
    pub swap_approved: bool,
}

impl TryFrom<&Shift> for ShiftInfo {
    type Error = ApiError;

    fn try_from(shift: &Shift) -> Result<Self, Self::Error> {
        Ok(Self {
            shift_id: require_id(shift.shift_id, "Shift")?,
            employee_id: shift.employee_id,
            manager_id: shift.manager_id,
            start_time: shift.time_range.start(),
            end_time: shift.time_range.end(),
            is_swap_requested: shift.is_swap_requested,
            swap_approved: shift.swap_approved,
        })
    }
}

/// API response listing shifts, earliest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListShiftsResponse {
    pub shifts: Vec<ShiftInfo>,
}

/// API response for a successful auto-assign call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignResponse {
    /// Every shift created, grouped by template in processing order.
    pub created: Vec<ShiftInfo>,
}

// ============================================================================
// Swaps
// ============================================================================

/// API request to offer the acting employee's shift to a colleague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSwapRequest {
    pub shift_id: i64,
    /// The employee who would take the shift over.
    pub requested_to: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A stored swap request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequestInfo {
    pub request_id: i64,
    pub shift_id: i64,
    pub requested_by: i64,
    pub requested_to: i64,
    pub reason: Option<String>,
    pub manager_approved: bool,
    pub recipient_approved: bool,
    pub is_approved: bool,
    /// The derived lifecycle state, e.g. `Requested` or `Approved`.
    pub state: String,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub rejected_at: Option<OffsetDateTime>,
}

impl TryFrom<&ShiftSwapRequest> for SwapRequestInfo {
    type Error = ApiError;

    fn try_from(request: &ShiftSwapRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            request_id: require_id(request.request_id, "Swap request")?,
            shift_id: request.shift_id,
            requested_by: request.requested_by,
            requested_to: request.requested_to,
            reason: request.reason.clone(),
            manager_approved: request.manager_approved,
            recipient_approved: request.recipient_approved,
            is_approved: request.is_approved,
            state: request.state().to_string(),
            requested_at: request.requested_at,
            approved_at: request.approved_at,
            rejected_at: request.rejected_at,
        })
    }
}

/// Where a swap request stands after an approve or reject call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    /// One approval is still missing.
    Partial,
    /// Both parties approved and the shift changed hands.
    Completed,
    Rejected,
}

/// API response for an approve or reject call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapDecisionResponse {
    pub status: SwapStatus,
    /// For a partial approval, whose approval is still missing
    /// (`manager`, `recipient` or `both`).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub waiting_on: Option<String>,
    pub request: SwapRequestInfo,
}

/// API response listing the requests awaiting the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSwapsResponse {
    pub requests: Vec<SwapRequestInfo>,
}

// ============================================================================
// Availability
// ============================================================================

/// API request to record a window in which the acting user cannot work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

/// A stored unavailability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityInfo {
    pub availability_id: i64,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

impl TryFrom<&Availability> for AvailabilityInfo {
    type Error = ApiError;

    fn try_from(window: &Availability) -> Result<Self, Self::Error> {
        Ok(Self {
            availability_id: require_id(window.availability_id, "Availability")?,
            user_id: window.user_id,
            start_time: window.time_range.start(),
            end_time: window.time_range.end(),
        })
    }
}

/// API response listing a user's unavailability windows, earliest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAvailabilityResponse {
    pub availability: Vec<AvailabilityInfo>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion back into domain values.

use diesel::prelude::*;
use flexirota_domain::{
    Availability, Organisation, Role, RoleRequirement, Shift, ShiftSwapRequest, ShiftTemplate,
    TimeRange, User, UserRole,
};
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::diesel_schema::{
    availability, organisations, roles, shift_role_requirements, shift_swap_requests,
    shift_templates, shifts, users,
};
use crate::error::PersistenceError;

/// Formats an instant for storage.
///
/// Always UTC with nine fractional digits, so stored values sort
/// chronologically as text.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    instant
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
        ))
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Parses a stored RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::ReconstructionError` if the text is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp '{value}': {e}"))
    })
}

fn parse_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(parse_timestamp).transpose()
}

fn parse_time_range(start: &str, end: &str) -> Result<TimeRange, PersistenceError> {
    TimeRange::new(parse_timestamp(start)?, parse_timestamp(end)?)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn bool_to_int(value: bool) -> i32 {
    i32::from(value)
}

const fn int_to_bool(value: i32) -> bool {
    value != 0
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = organisations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrganisationRow {
    pub organisation_id: i64,
    pub name: String,
    pub created_at: String,
}

impl OrganisationRow {
    pub fn into_domain(self) -> Result<Organisation, PersistenceError> {
        Ok(Organisation::with_id(
            self.organisation_id,
            self.name,
            parse_timestamp(&self.created_at)?,
        ))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoleRow {
    pub role_id: i64,
    pub organisation_id: i64,
    pub name: String,
}

impl RoleRow {
    pub fn into_domain(self) -> Role {
        Role::with_id(self.role_id, self.organisation_id, self.name)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: String,
    pub role_title_id: Option<i64>,
    pub pay_rate_cents: Option<i64>,
    pub organisation_id: Option<i64>,
}

impl UserRow {
    pub fn into_domain(self) -> Result<User, PersistenceError> {
        let role: UserRole = UserRole::from_str(&self.role)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let pay_rate_cents: Option<u32> = self
            .pay_rate_cents
            .map(u32::try_from)
            .transpose()
            .map_err(|e| {
                PersistenceError::ReconstructionError(format!(
                    "Invalid pay rate for user {}: {e}",
                    self.user_id
                ))
            })?;

        let mut user: User = User::new(self.username, self.name, role).with_id(self.user_id);
        user.email = self.email;
        user.phone_number = self.phone_number;
        user.role_title_id = self.role_title_id;
        user.pay_rate_cents = pay_rate_cents;
        user.organisation_id = self.organisation_id;
        Ok(user)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_templates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShiftTemplateRow {
    pub template_id: i64,
    pub manager_id: i64,
    pub start_time: String,
    pub end_time: String,
}

impl ShiftTemplateRow {
    pub fn into_domain(
        self,
        requirements: Vec<RoleRequirement>,
    ) -> Result<ShiftTemplate, PersistenceError> {
        let mut template: ShiftTemplate = ShiftTemplate::new(
            self.manager_id,
            parse_time_range(&self.start_time, &self.end_time)?,
            requirements,
        );
        template.template_id = Some(self.template_id);
        Ok(template)
    }
}

/// A requirement row joined with the name of its role.
#[derive(Queryable)]
pub struct RequirementWithRoleRow {
    pub requirement_id: i64,
    pub template_id: i64,
    pub role_id: i64,
    pub quantity: i32,
    pub role_name: String,
}

impl RequirementWithRoleRow {
    pub fn into_domain(self) -> Result<RoleRequirement, PersistenceError> {
        let quantity: u32 = u32::try_from(self.quantity).map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Invalid quantity on requirement {}: {e}",
                self.requirement_id
            ))
        })?;
        let mut requirement: RoleRequirement =
            RoleRequirement::new(self.role_id, self.role_name, quantity);
        requirement.requirement_id = Some(self.requirement_id);
        Ok(requirement)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShiftRow {
    pub shift_id: i64,
    pub employee_id: i64,
    pub manager_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub is_swap_requested: i32,
    pub swap_approved: i32,
}

impl ShiftRow {
    pub fn into_domain(self) -> Result<Shift, PersistenceError> {
        let mut shift: Shift = Shift::new(
            self.employee_id,
            self.manager_id,
            parse_time_range(&self.start_time, &self.end_time)?,
        );
        shift.shift_id = Some(self.shift_id);
        shift.is_swap_requested = int_to_bool(self.is_swap_requested);
        shift.swap_approved = int_to_bool(self.swap_approved);
        Ok(shift)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_swap_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SwapRequestRow {
    pub request_id: i64,
    pub shift_id: i64,
    pub requested_by: i64,
    pub requested_to: i64,
    pub reason: Option<String>,
    pub manager_approved: i32,
    pub recipient_approved: i32,
    pub is_approved: i32,
    pub requested_at: String,
    pub approved_at: Option<String>,
    pub rejected_at: Option<String>,
    pub version: i64,
}

impl SwapRequestRow {
    pub fn into_domain(self) -> Result<ShiftSwapRequest, PersistenceError> {
        let mut request: ShiftSwapRequest = ShiftSwapRequest::new(
            self.shift_id,
            self.requested_by,
            self.requested_to,
            self.reason,
            parse_timestamp(&self.requested_at)?,
        );
        request.request_id = Some(self.request_id);
        request.manager_approved = int_to_bool(self.manager_approved);
        request.recipient_approved = int_to_bool(self.recipient_approved);
        request.is_approved = int_to_bool(self.is_approved);
        request.approved_at = parse_optional_timestamp(self.approved_at.as_deref())?;
        request.rejected_at = parse_optional_timestamp(self.rejected_at.as_deref())?;
        request.version = self.version;
        Ok(request)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = availability)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AvailabilityRow {
    pub availability_id: i64,
    pub user_id: i64,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityRow {
    pub fn into_domain(self) -> Result<Availability, PersistenceError> {
        let mut availability: Availability = Availability::new(
            self.user_id,
            parse_time_range(&self.start_time, &self.end_time)?,
        );
        availability.availability_id = Some(self.availability_id);
        Ok(availability)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the already authenticated acting user. Handlers
//! load what they need, check authorization, call into the core, and
//! persist the result.

mod assignment;
mod availability;
mod organisation;
mod schedule;
mod swaps;

pub use assignment::auto_assign;
pub use availability::{create_availability, delete_availability, list_availability};
pub use organisation::{
    create_organisation, create_role, get_user, list_roles, list_users, register_user,
    update_user,
};
pub use schedule::{
    create_shift, create_shift_template, delete_shift, delete_shift_template, list_shift_templates,
    list_shifts, update_shift,
};
pub use swaps::{approve_swap, pending_swaps, reject_swap, request_swap};

use flexirota_domain::{DomainError, TimeRange, User};
use flexirota_persistence::PersistenceError;
use time::OffsetDateTime;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};

/// Maps a persistence failure while handling `resource_type`.
fn store_error(resource_type: &'static str) -> impl Fn(PersistenceError) -> ApiError {
    move |err| translate_persistence_error(err, resource_type)
}

fn time_range(start: OffsetDateTime, end: OffsetDateTime) -> Result<TimeRange, ApiError> {
    TimeRange::new(start, end).map_err(translate_domain_error)
}

fn actor_id(actor: &User) -> Result<i64, ApiError> {
    actor.id().map_err(translate_domain_error)
}

/// Converts saved domain values into their response form.
fn to_infos<'a, T, I>(items: &'a [T]) -> Result<Vec<I>, ApiError>
where
    I: TryFrom<&'a T, Error = ApiError>,
{
    items.iter().map(I::try_from).collect()
}

/// Requires `user` to be an employee of `organisation_id`.
fn require_employee_of(user: &User, organisation_id: i64) -> Result<(), ApiError> {
    let user_id: i64 = actor_id(user)?;
    if !user.is_employee() {
        return Err(translate_domain_error(DomainError::NotAnEmployee { user_id }));
    }
    if user.organisation_id != Some(organisation_id) {
        return Err(translate_domain_error(DomainError::CrossOrganisation {
            user_id,
            organisation_id,
        }));
    }
    Ok(())
}

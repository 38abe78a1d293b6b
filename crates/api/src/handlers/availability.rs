// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota_domain::{Availability, User};
use flexirota_persistence::Persistence;

use super::{actor_id, store_error, time_range, to_infos};
use crate::auth::AuthorizationService;
use crate::error::ApiError;
use crate::request_response::{
    AvailabilityInfo, CreateAvailabilityRequest, ListAvailabilityResponse,
};

/// Records a window in which the acting user cannot work.
///
/// # Errors
///
/// Returns an error if the time range is invalid or persistence fails.
pub fn create_availability(
    persistence: &mut Persistence,
    actor: &User,
    request: &CreateAvailabilityRequest,
) -> Result<AvailabilityInfo, ApiError> {
    let window: Availability = Availability::new(
        actor_id(actor)?,
        time_range(request.start_time, request.end_time)?,
    );
    let saved: Availability = persistence
        .create_availability(&window)
        .map_err(store_error("Availability"))?;
    AvailabilityInfo::try_from(&saved)
}

/// # Errors
///
/// Returns an error if the query fails.
pub fn list_availability(
    persistence: &mut Persistence,
    actor: &User,
) -> Result<ListAvailabilityResponse, ApiError> {
    let windows: Vec<Availability> = persistence
        .list_availability_by_user(actor_id(actor)?)
        .map_err(store_error("Availability"))?;
    Ok(ListAvailabilityResponse {
        availability: to_infos(&windows)?,
    })
}

/// Deletes one of the acting user's windows.
///
/// # Errors
///
/// Returns an error if the window does not exist or belongs to someone else.
pub fn delete_availability(
    persistence: &mut Persistence,
    actor: &User,
    availability_id: i64,
) -> Result<(), ApiError> {
    let window: Availability = persistence
        .get_availability(availability_id)
        .map_err(store_error("Availability"))?;
    AuthorizationService::require_self(actor, window.user_id, "delete_availability")?;

    persistence
        .delete_availability(availability_id)
        .map_err(store_error("Availability"))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota::TemplateAssignment;
use flexirota_domain::{RoleRequirement, Shift, ShiftTemplate};
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{bool_to_int, format_timestamp};
use crate::diesel_schema::{shift_role_requirements, shift_templates, shifts};
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a template and its requirements in one transaction.
///
/// # Errors
///
/// Returns an error if any insert fails, in which case nothing is stored.
pub fn create_shift_template(
    conn: &mut SqliteConnection,
    template: &ShiftTemplate,
) -> Result<ShiftTemplate, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(shift_templates::table)
            .values((
                shift_templates::manager_id.eq(template.manager_id),
                shift_templates::start_time.eq(format_timestamp(template.time_range.start())?),
                shift_templates::end_time.eq(format_timestamp(template.time_range.end())?),
            ))
            .execute(conn)?;
        let template_id: i64 = conn.get_last_insert_rowid()?;

        let mut requirements: Vec<RoleRequirement> =
            Vec::with_capacity(template.requirements.len());
        for requirement in &template.requirements {
            let quantity: i32 = i32::try_from(requirement.quantity).map_err(|_| {
                PersistenceError::Other(format!(
                    "Quantity {} is out of range",
                    requirement.quantity
                ))
            })?;
            diesel::insert_into(shift_role_requirements::table)
                .values((
                    shift_role_requirements::template_id.eq(template_id),
                    shift_role_requirements::role_id.eq(requirement.role_id),
                    shift_role_requirements::quantity.eq(quantity),
                ))
                .execute(conn)?;
            let mut saved: RoleRequirement = requirement.clone();
            saved.requirement_id = Some(conn.get_last_insert_rowid()?);
            requirements.push(saved);
        }

        info!(
            template_id,
            manager_id = template.manager_id,
            requirements = requirements.len(),
            "Created shift template"
        );

        let mut saved: ShiftTemplate = template.clone();
        saved.template_id = Some(template_id);
        saved.requirements = requirements;
        Ok(saved)
    })
}

/// Deletes a template. Its requirements cascade.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the template does not exist.
pub fn delete_shift_template(
    conn: &mut SqliteConnection,
    template_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(shift_templates::table.find(template_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift template {template_id} not found"
        )));
    }
    info!(template_id, "Deleted shift template");
    Ok(())
}

fn insert_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<Shift, PersistenceError> {
    diesel::insert_into(shifts::table)
        .values((
            shifts::employee_id.eq(shift.employee_id),
            shifts::manager_id.eq(shift.manager_id),
            shifts::start_time.eq(format_timestamp(shift.time_range.start())?),
            shifts::end_time.eq(format_timestamp(shift.time_range.end())?),
            shifts::is_swap_requested.eq(bool_to_int(shift.is_swap_requested)),
            shifts::swap_approved.eq(bool_to_int(shift.swap_approved)),
        ))
        .execute(conn)?;

    let mut saved: Shift = shift.clone();
    saved.shift_id = Some(conn.get_last_insert_rowid()?);
    Ok(saved)
}

fn require_shift_id(shift: &Shift) -> Result<i64, PersistenceError> {
    shift
        .shift_id
        .ok_or_else(|| PersistenceError::Other(String::from("Cannot update an unsaved shift")))
}

/// Moves a stored shift to a new holder or time range.
///
/// The swap flags are left as stored. A change of holder is refused while
/// the stored row is marked swap-requested, checked inside the same
/// `BEGIN IMMEDIATE` transaction as the write. Returns the shift as stored
/// afterwards.
///
/// # Errors
///
/// Returns an error if:
/// - The shift does not exist (`NotFound`)
/// - The holder would change under an open swap request (`SwapAlreadyPending`)
pub fn update_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<Shift, PersistenceError> {
    let shift_id: i64 = require_shift_id(shift)?;

    conn.immediate_transaction(|conn| {
        let mut stored: Shift = queries::schedule::get_shift(conn, shift_id)?;
        if stored.employee_id != shift.employee_id && stored.is_swap_requested {
            warn!(shift_id, employee_id = shift.employee_id, "Shift has an open swap request");
            return Err(PersistenceError::SwapAlreadyPending { shift_id });
        }

        diesel::update(shifts::table.find(shift_id))
            .set((
                shifts::employee_id.eq(shift.employee_id),
                shifts::start_time.eq(format_timestamp(shift.time_range.start())?),
                shifts::end_time.eq(format_timestamp(shift.time_range.end())?),
            ))
            .execute(conn)?;

        stored.employee_id = shift.employee_id;
        stored.time_range = shift.time_range;
        debug!(shift_id, employee_id = stored.employee_id, "Wrote shift");
        Ok(stored)
    })
}

/// Writes the swap-owned columns of `shift`: its two flags and, when
/// `reassign` is set, its holder.
///
/// Must run inside the caller's swap transaction. The time range and
/// manager are never touched, so a concurrent reschedule survives.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift does not exist.
pub(crate) fn write_swap_state(
    conn: &mut SqliteConnection,
    shift: &Shift,
    reassign: bool,
) -> Result<(), PersistenceError> {
    let shift_id: i64 = require_shift_id(shift)?;
    let target = shifts::table.find(shift_id);
    let flags = (
        shifts::is_swap_requested.eq(bool_to_int(shift.is_swap_requested)),
        shifts::swap_approved.eq(bool_to_int(shift.swap_approved)),
    );

    let updated: usize = if reassign {
        diesel::update(target)
            .set((shifts::employee_id.eq(shift.employee_id), flags))
            .execute(conn)?
    } else {
        diesel::update(target).set(flags).execute(conn)?
    };

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift {shift_id} not found"
        )));
    }
    debug!(shift_id, reassign, "Wrote shift swap state");
    Ok(())
}

/// Inserts a single shift.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<Shift, PersistenceError> {
    let saved: Shift = insert_shift(conn, shift)?;
    info!(
        shift_id = saved.shift_id,
        employee_id = saved.employee_id,
        "Created shift"
    );
    Ok(saved)
}

/// Deletes a shift. Any swap requests on it cascade.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift does not exist.
pub fn delete_shift(conn: &mut SqliteConnection, shift_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(shifts::table.find(shift_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift {shift_id} not found"
        )));
    }
    info!(shift_id, "Deleted shift");
    Ok(())
}

/// Stores the shifts of a staffed template and deletes the template.
///
/// Runs in one transaction. If the template has already gone (for example
/// consumed by a concurrent call) nothing is written.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the template no longer exists.
pub fn commit_template_assignment(
    conn: &mut SqliteConnection,
    assignment: &TemplateAssignment,
) -> Result<Vec<Shift>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let mut saved: Vec<Shift> = Vec::with_capacity(assignment.shifts.len());
        for shift in &assignment.shifts {
            saved.push(insert_shift(conn, shift)?);
        }

        let deleted: usize =
            diesel::delete(shift_templates::table.find(assignment.template_id)).execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Shift template {} not found",
                assignment.template_id
            )));
        }

        info!(
            template_id = assignment.template_id,
            shifts = saved.len(),
            "Committed template assignment"
        );
        Ok(saved)
    })
}

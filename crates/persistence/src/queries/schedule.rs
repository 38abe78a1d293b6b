// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota_domain::{RoleRequirement, Shift, ShiftTemplate};
use std::collections::HashMap;
use time::OffsetDateTime;

use crate::data_models::{RequirementWithRoleRow, ShiftRow, ShiftTemplateRow, format_timestamp};
use crate::diesel_schema::{roles, shift_role_requirements, shift_templates, shifts};
use crate::error::PersistenceError;

/// Loads the requirements of the given templates, grouped by template and
/// ordered by requirement ID.
fn load_requirements(
    conn: &mut SqliteConnection,
    template_ids: &[i64],
) -> Result<HashMap<i64, Vec<RoleRequirement>>, PersistenceError> {
    let rows: Vec<RequirementWithRoleRow> = shift_role_requirements::table
        .inner_join(roles::table)
        .filter(shift_role_requirements::template_id.eq_any(template_ids))
        .order(shift_role_requirements::requirement_id.asc())
        .select((
            shift_role_requirements::requirement_id,
            shift_role_requirements::template_id,
            shift_role_requirements::role_id,
            shift_role_requirements::quantity,
            roles::name,
        ))
        .load(conn)?;

    let mut grouped: HashMap<i64, Vec<RoleRequirement>> = HashMap::new();
    for row in rows {
        let template_id: i64 = row.template_id;
        grouped
            .entry(template_id)
            .or_default()
            .push(row.into_domain()?);
    }
    Ok(grouped)
}

fn assemble_templates(
    conn: &mut SqliteConnection,
    rows: Vec<ShiftTemplateRow>,
) -> Result<Vec<ShiftTemplate>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.template_id).collect();
    let mut requirements: HashMap<i64, Vec<RoleRequirement>> = load_requirements(conn, &ids)?;

    rows.into_iter()
        .map(|row| {
            let reqs: Vec<RoleRequirement> =
                requirements.remove(&row.template_id).unwrap_or_default();
            row.into_domain(reqs)
        })
        .collect()
}

/// Retrieves a shift template with its requirements.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such template exists.
pub fn get_shift_template(
    conn: &mut SqliteConnection,
    template_id: i64,
) -> Result<ShiftTemplate, PersistenceError> {
    let row: ShiftTemplateRow = shift_templates::table
        .find(template_id)
        .select(ShiftTemplateRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Shift template {template_id} not found"))
        })?;

    assemble_templates(conn, vec![row])?
        .pop()
        .ok_or_else(|| PersistenceError::Other(String::from("Template vanished during load")))
}

/// Lists a manager's templates in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_shift_templates_by_manager(
    conn: &mut SqliteConnection,
    manager_id: i64,
) -> Result<Vec<ShiftTemplate>, PersistenceError> {
    let rows: Vec<ShiftTemplateRow> = shift_templates::table
        .filter(shift_templates::manager_id.eq(manager_id))
        .order(shift_templates::template_id.asc())
        .select(ShiftTemplateRow::as_select())
        .load(conn)?;

    assemble_templates(conn, rows)
}

/// Retrieves a shift by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such shift exists.
pub fn get_shift(conn: &mut SqliteConnection, shift_id: i64) -> Result<Shift, PersistenceError> {
    shifts::table
        .find(shift_id)
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Shift {shift_id} not found")))?
        .into_domain()
}

fn load_shifts(rows: Vec<ShiftRow>) -> Result<Vec<Shift>, PersistenceError> {
    rows.into_iter().map(ShiftRow::into_domain).collect()
}

/// Lists the shifts worked by an employee, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_shifts_by_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::employee_id.eq(employee_id))
        .order((shifts::start_time.asc(), shifts::shift_id.asc()))
        .select(ShiftRow::as_select())
        .load(conn)?;
    load_shifts(rows)
}

/// Lists the shifts owned by a manager, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_shifts_by_manager(
    conn: &mut SqliteConnection,
    manager_id: i64,
) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::manager_id.eq(manager_id))
        .order((shifts::start_time.asc(), shifts::shift_id.asc()))
        .select(ShiftRow::as_select())
        .load(conn)?;
    load_shifts(rows)
}

/// Lists shifts of any of `employee_ids` starting at or after `since`.
///
/// This is the input to workload computation.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_shifts_for_employees_since(
    conn: &mut SqliteConnection,
    employee_ids: &[i64],
    since: OffsetDateTime,
) -> Result<Vec<Shift>, PersistenceError> {
    let since_text: String = format_timestamp(since)?;
    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::employee_id.eq_any(employee_ids))
        .filter(shifts::start_time.ge(since_text))
        .order(shifts::shift_id.asc())
        .select(ShiftRow::as_select())
        .load(conn)?;
    load_shifts(rows)
}

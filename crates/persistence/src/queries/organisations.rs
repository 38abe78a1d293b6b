// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota_domain::{Organisation, Role, User, UserRole};
use tracing::debug;

use crate::data_models::{OrganisationRow, RoleRow, UserRow};
use crate::diesel_schema::{organisations, roles, users};
use crate::error::PersistenceError;

/// Retrieves an organisation by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such organisation exists.
pub fn get_organisation(
    conn: &mut SqliteConnection,
    organisation_id: i64,
) -> Result<Organisation, PersistenceError> {
    let row: Option<OrganisationRow> = organisations::table
        .find(organisation_id)
        .select(OrganisationRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| {
        PersistenceError::NotFound(format!("Organisation {organisation_id} not found"))
    })?
    .into_domain()
}

/// Retrieves a role by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such role exists.
pub fn get_role(conn: &mut SqliteConnection, role_id: i64) -> Result<Role, PersistenceError> {
    let row: Option<RoleRow> = roles::table
        .find(role_id)
        .select(RoleRow::as_select())
        .first(conn)
        .optional()?;

    row.map(RoleRow::into_domain)
        .ok_or_else(|| PersistenceError::NotFound(format!("Role {role_id} not found")))
}

/// Lists the roles of an organisation ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_roles(
    conn: &mut SqliteConnection,
    organisation_id: i64,
) -> Result<Vec<Role>, PersistenceError> {
    let rows: Vec<RoleRow> = roles::table
        .filter(roles::organisation_id.eq(organisation_id))
        .order(roles::name.asc())
        .select(RoleRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(RoleRow::into_domain).collect())
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such user exists.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<User, PersistenceError> {
    let row: Option<UserRow> = users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::NotFound(format!("User {user_id} not found")))?
        .into_domain()
}

/// Lists all users of an organisation in user-id order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_users_by_organisation(
    conn: &mut SqliteConnection,
    organisation_id: i64,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::organisation_id.eq(organisation_id))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    rows.into_iter().map(UserRow::into_domain).collect()
}

/// Lists the employees of an organisation in user-id order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_employees_by_organisation(
    conn: &mut SqliteConnection,
    organisation_id: i64,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::organisation_id.eq(organisation_id))
        .filter(users::role.eq(UserRole::Employee.as_str()))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    debug!(
        organisation_id,
        count = rows.len(),
        "Loaded organisation employees"
    );
    rows.into_iter().map(UserRow::into_domain).collect()
}

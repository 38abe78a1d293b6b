// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use flexirota_domain::{Organisation, Role, User};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::{organisations, roles, users};
use crate::error::PersistenceError;

fn pay_rate_column(user: &User) -> Option<i64> {
    user.pay_rate_cents.map(i64::from)
}

/// Inserts an organisation and returns it with its new ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_organisation(
    conn: &mut SqliteConnection,
    organisation: &Organisation,
) -> Result<Organisation, PersistenceError> {
    diesel::insert_into(organisations::table)
        .values((
            organisations::name.eq(organisation.name()),
            organisations::created_at.eq(format_timestamp(organisation.created_at())?),
        ))
        .execute(conn)?;

    let organisation_id: i64 = conn.get_last_insert_rowid()?;
    info!(organisation_id, name = organisation.name(), "Created organisation");

    Ok(Organisation::with_id(
        organisation_id,
        organisation.name().to_string(),
        organisation.created_at(),
    ))
}

/// Inserts a role and returns it with its new ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the organisation already
/// has a role with this name.
pub fn create_role(conn: &mut SqliteConnection, role: &Role) -> Result<Role, PersistenceError> {
    diesel::insert_into(roles::table)
        .values((
            roles::organisation_id.eq(role.organisation_id()),
            roles::name.eq(role.name()),
        ))
        .execute(conn)
        .map_err(|e| match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => PersistenceError::UniqueViolation(format!(
                "Role '{}' already exists in organisation {}",
                role.name(),
                role.organisation_id()
            )),
            other => other,
        })?;

    let role_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        role_id,
        organisation_id = role.organisation_id(),
        "Created role"
    );

    Ok(Role::with_id(
        role_id,
        role.organisation_id(),
        role.name().to_string(),
    ))
}

/// Inserts a user and returns it with its new ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the username is taken.
pub fn create_user(conn: &mut SqliteConnection, user: &User) -> Result<User, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::username.eq(&user.username),
            users::name.eq(&user.name),
            users::email.eq(user.email.as_deref()),
            users::phone_number.eq(user.phone_number.as_deref()),
            users::role.eq(user.role.as_str()),
            users::role_title_id.eq(user.role_title_id),
            users::pay_rate_cents.eq(pay_rate_column(user)),
            users::organisation_id.eq(user.organisation_id),
        ))
        .execute(conn)
        .map_err(|e| match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => PersistenceError::UniqueViolation(format!(
                "Username '{}' is already taken",
                user.username
            )),
            other => other,
        })?;

    let user_id: i64 = conn.get_last_insert_rowid()?;
    info!(user_id, role = user.role.as_str(), "Registered user");

    Ok(user.clone().with_id(user_id))
}

/// Overwrites a user's mutable fields.
///
/// The username and coarse role are fixed at registration.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist.
pub fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<(), PersistenceError> {
    let user_id: i64 = user
        .user_id
        .ok_or_else(|| PersistenceError::Other(String::from("Cannot update an unsaved user")))?;

    let updated: usize = diesel::update(users::table.find(user_id))
        .set((
            users::name.eq(&user.name),
            users::email.eq(user.email.as_deref()),
            users::phone_number.eq(user.phone_number.as_deref()),
            users::role_title_id.eq(user.role_title_id),
            users::pay_rate_cents.eq(pay_rate_column(user)),
            users::organisation_id.eq(user.organisation_id),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User {user_id} not found"
        )));
    }

    info!(user_id, "Updated user");
    Ok(())
}

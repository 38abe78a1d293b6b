// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for FlexiRota.
//!
//! This crate stores organisations, users, shift templates, shifts, swap
//! requests and availability in `SQLite` through Diesel. Migrations are
//! embedded and applied on open.
//!
//! ## Transactions
//!
//! - Committing a template assignment writes all of its shifts and deletes
//!   the template atomically.
//! - Opening a swap request inserts the request and marks the shift
//!   atomically. A partial unique index allows only one unresolved request
//!   per shift.
//! - Persisting a swap transition runs under `BEGIN IMMEDIATE` and checks
//!   the request's version, so concurrent approvals are serialized and the
//!   loser gets `PersistenceError::Conflict`.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated shared-cache in-memory databases
//! - Concurrency tests use a temporary file database with one connection per thread

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use flexirota::{SwapTransition, TemplateAssignment};
use flexirota_domain::{
    Availability, Organisation, Role, Shift, ShiftSwapRequest, ShiftTemplate, User,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use data_models::{format_timestamp, parse_timestamp};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database via an atomic
    /// counter, so tests never observe each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// Several adapters may open the same file; writes are serialized by
    /// `SQLite` and wait up to the busy timeout for the lock.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Organisations, Roles & Users
    // ========================================================================

    /// Stores a new organisation.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_organisation(
        &mut self,
        organisation: &Organisation,
    ) -> Result<Organisation, PersistenceError> {
        mutations::organisations::create_organisation(&mut self.conn, organisation)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the organisation does not exist.
    pub fn get_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<Organisation, PersistenceError> {
        queries::organisations::get_organisation(&mut self.conn, organisation_id)
    }

    /// Stores a new role.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the name is taken in
    /// the organisation.
    pub fn create_role(&mut self, role: &Role) -> Result<Role, PersistenceError> {
        mutations::organisations::create_role(&mut self.conn, role)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the role does not exist.
    pub fn get_role(&mut self, role_id: i64) -> Result<Role, PersistenceError> {
        queries::organisations::get_role(&mut self.conn, role_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_roles(&mut self, organisation_id: i64) -> Result<Vec<Role>, PersistenceError> {
        queries::organisations::list_roles(&mut self.conn, organisation_id)
    }

    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the username is taken.
    pub fn create_user(&mut self, user: &User) -> Result<User, PersistenceError> {
        mutations::organisations::create_user(&mut self.conn, user)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the user does not exist.
    pub fn get_user(&mut self, user_id: i64) -> Result<User, PersistenceError> {
        queries::organisations::get_user(&mut self.conn, user_id)
    }

    /// Overwrites a user's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the user does not exist.
    pub fn update_user(&mut self, user: &User) -> Result<(), PersistenceError> {
        mutations::organisations::update_user(&mut self.conn, user)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users_by_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<Vec<User>, PersistenceError> {
        queries::organisations::list_users_by_organisation(&mut self.conn, organisation_id)
    }

    /// Lists only the employees of an organisation, in user-id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees_by_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<Vec<User>, PersistenceError> {
        queries::organisations::list_employees_by_organisation(&mut self.conn, organisation_id)
    }

    // ========================================================================
    // Shift Templates
    // ========================================================================

    /// Stores a template together with its requirements.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is stored in that case.
    pub fn create_shift_template(
        &mut self,
        template: &ShiftTemplate,
    ) -> Result<ShiftTemplate, PersistenceError> {
        mutations::schedule::create_shift_template(&mut self.conn, template)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the template does not exist.
    pub fn get_shift_template(
        &mut self,
        template_id: i64,
    ) -> Result<ShiftTemplate, PersistenceError> {
        queries::schedule::get_shift_template(&mut self.conn, template_id)
    }

    /// Lists a manager's templates in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shift_templates_by_manager(
        &mut self,
        manager_id: i64,
    ) -> Result<Vec<ShiftTemplate>, PersistenceError> {
        queries::schedule::list_shift_templates_by_manager(&mut self.conn, manager_id)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the template does not exist.
    pub fn delete_shift_template(&mut self, template_id: i64) -> Result<(), PersistenceError> {
        mutations::schedule::delete_shift_template(&mut self.conn, template_id)
    }

    /// Stores the shifts of a staffed template and deletes the template, atomically.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the template no longer exists.
    pub fn commit_template_assignment(
        &mut self,
        assignment: &TemplateAssignment,
    ) -> Result<Vec<Shift>, PersistenceError> {
        mutations::schedule::commit_template_assignment(&mut self.conn, assignment)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_shift(&mut self, shift: &Shift) -> Result<Shift, PersistenceError> {
        mutations::schedule::create_shift(&mut self.conn, shift)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the shift does not exist.
    pub fn get_shift(&mut self, shift_id: i64) -> Result<Shift, PersistenceError> {
        queries::schedule::get_shift(&mut self.conn, shift_id)
    }

    /// Writes a shift's holder and time range, returning the stored shift.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the shift does not exist, or
    /// `PersistenceError::SwapAlreadyPending` if the holder would change while
    /// a swap request is open.
    pub fn update_shift(&mut self, shift: &Shift) -> Result<Shift, PersistenceError> {
        mutations::schedule::update_shift(&mut self.conn, shift)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the shift does not exist.
    pub fn delete_shift(&mut self, shift_id: i64) -> Result<(), PersistenceError> {
        mutations::schedule::delete_shift(&mut self.conn, shift_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shifts_by_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<Shift>, PersistenceError> {
        queries::schedule::list_shifts_by_employee(&mut self.conn, employee_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shifts_by_manager(
        &mut self,
        manager_id: i64,
    ) -> Result<Vec<Shift>, PersistenceError> {
        queries::schedule::list_shifts_by_manager(&mut self.conn, manager_id)
    }

    /// Lists shifts of the given employees starting at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shifts_for_employees_since(
        &mut self,
        employee_ids: &[i64],
        since: OffsetDateTime,
    ) -> Result<Vec<Shift>, PersistenceError> {
        queries::schedule::list_shifts_for_employees_since(&mut self.conn, employee_ids, since)
    }

    // ========================================================================
    // Swap Requests
    // ========================================================================

    /// Stores a newly opened request and marks its shift, atomically.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SwapAlreadyPending` if the shift already
    /// has an unresolved request.
    pub fn create_swap_request(
        &mut self,
        transition: &SwapTransition,
    ) -> Result<ShiftSwapRequest, PersistenceError> {
        mutations::swaps::create_swap_request(&mut self.conn, transition)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the request does not exist.
    pub fn get_swap_request(
        &mut self,
        request_id: i64,
    ) -> Result<ShiftSwapRequest, PersistenceError> {
        queries::swaps::get_swap_request(&mut self.conn, request_id)
    }

    /// Persists an approval or rejection if the request is still at
    /// `expected_version`. Returns the request with its new version.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the request changed since it
    /// was read, or `PersistenceError::NotFound` if it no longer exists.
    pub fn persist_swap_transition(
        &mut self,
        transition: &SwapTransition,
        expected_version: i64,
    ) -> Result<ShiftSwapRequest, PersistenceError> {
        mutations::swaps::persist_swap_transition(&mut self.conn, transition, expected_version)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pending_swaps(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<ShiftSwapRequest>, PersistenceError> {
        queries::swaps::list_pending_swaps(&mut self.conn, user_id)
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_availability(
        &mut self,
        window: &Availability,
    ) -> Result<Availability, PersistenceError> {
        mutations::availability::create_availability(&mut self.conn, window)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the window does not exist.
    pub fn get_availability(
        &mut self,
        availability_id: i64,
    ) -> Result<Availability, PersistenceError> {
        queries::availability::get_availability(&mut self.conn, availability_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_availability_by_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<Availability>, PersistenceError> {
        queries::availability::list_availability_by_user(&mut self.conn, user_id)
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the window does not exist.
    pub fn delete_availability(&mut self, availability_id: i64) -> Result<(), PersistenceError> {
        mutations::availability::delete_availability(&mut self.conn, availability_id)
    }
}

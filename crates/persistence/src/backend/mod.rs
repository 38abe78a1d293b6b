// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup and the raw-SQL corners Diesel cannot reach.
//!
//! Rota reads and writes belong in `queries/` and `mutations/`; this
//! module only opens, configures and migrates the store.

pub mod sqlite;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Extra connection capabilities the mutation layer relies on.
///
/// Mutations insert a parent row (template, shift, swap request) and then
/// need its fresh id to attach children or return the saved value.
pub trait PersistenceBackend: Connection {
    /// Id generated by the most recent `INSERT` on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Confirms cascading deletes will actually fire.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ForeignKeyEnforcementNotEnabled`] when the
    /// connection was opened without foreign key support.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::check_foreign_keys(self)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection handling for the rota store.
//!
//! Every connection gets the same PRAGMA set on open. File databases are
//! additionally switched to WAL so that concurrent swap approvals from
//! separate connections can read while one of them holds the write lock.

use diesel::dsl::sql;
use diesel::migration::MigrationVersion;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, warn};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits for a competing writer before failing.
const BUSY_TIMEOUT_MS: &str = "5000";

/// Applied to every connection, in order.
const CONNECTION_PRAGMAS: [(&str, &str); 2] =
    [("foreign_keys", "ON"), ("busy_timeout", BUSY_TIMEOUT_MS)];

// Diesel has no PRAGMA DSL, so these two rows back the raw reads below.

#[derive(QueryableByName)]
struct ForeignKeysRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

fn set_pragma(
    conn: &mut SqliteConnection,
    name: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    diesel::sql_query(format!("PRAGMA {name} = {value}"))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("PRAGMA {name}: {e}")))?;
    Ok(())
}

pub(crate) fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless `PRAGMA foreign_keys` reports enforcement.
///
/// Deleting a template, shift or user relies on `ON DELETE CASCADE`; with
/// enforcement off those deletes would leave orphaned requirements and swap
/// requests behind.
///
/// # Errors
///
/// Returns an error if the PRAGMA cannot be read or reports `0`.
pub(crate) fn check_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;

    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("Foreign key enforcement confirmed");
    Ok(())
}

/// Opens a connection and applies [`CONNECTION_PRAGMAS`].
///
/// # Errors
///
/// Returns an error if the connection cannot be opened or a PRAGMA fails.
pub fn establish(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    for (name, value) in CONNECTION_PRAGMAS {
        set_pragma(&mut conn, name, value)?;
    }
    debug!(busy_timeout_ms = BUSY_TIMEOUT_MS, "Connection configured");

    Ok(conn)
}

/// Opens `database_url` and brings its schema up to date.
///
/// Accepts both plain file paths and `file:` URIs such as the shared-cache
/// in-memory databases used by tests.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened or a migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening rota database");

    let mut conn: SqliteConnection = establish(database_url)?;
    let applied: Vec<MigrationVersion<'_>> = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    if applied.is_empty() {
        debug!("Schema already current");
    } else {
        info!(count = applied.len(), "Applied pending migrations");
    }

    Ok(conn)
}

/// Switches a file database to write-ahead logging.
///
/// `SQLite` answers with the mode actually in effect; anything other than
/// `wal` is logged and tolerated, since the store still works in rollback
/// journal mode, only with readers blocked during writes.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: JournalModeRow = diesel::sql_query("PRAGMA journal_mode = WAL")
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("PRAGMA journal_mode: {e}")))?;

    if row.journal_mode.eq_ignore_ascii_case("wal") {
        debug!("Write-ahead logging enabled");
    } else {
        warn!(journal_mode = %row.journal_mode, "Database refused WAL mode");
    }
    Ok(())
}

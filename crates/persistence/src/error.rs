// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Failures raised by the rota store.
///
/// Variants split into three groups: opening the store, row-level outcomes
/// the API maps to client errors, and everything else (which it reports as
/// internal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    // ------------------------------------------------------------------
    // Opening the store
    // ------------------------------------------------------------------
    /// The database file or URI could not be opened.
    DatabaseConnectionFailed(String),
    /// An embedded migration did not apply.
    MigrationFailed(String),
    /// The store was handed something it cannot open, such as a non UTF-8 path.
    InitializationError(String),
    /// `PRAGMA foreign_keys` reported enforcement off after setup.
    ForeignKeyEnforcementNotEnabled,

    // ------------------------------------------------------------------
    // Row-level outcomes
    // ------------------------------------------------------------------
    /// No row matched.
    NotFound(String),
    /// The row's version moved on since it was read.
    Conflict(String),
    /// A unique index refused the write (usernames, role names per organisation).
    UniqueViolation(String),
    /// The open-request index on `swap_requests` refused a second offer.
    SwapAlreadyPending { shift_id: i64 },
    /// A stored value no longer parses into its domain type.
    ReconstructionError(String),

    // ------------------------------------------------------------------
    // Everything else
    // ------------------------------------------------------------------
    /// Diesel reported an error with no more specific mapping.
    DatabaseError(String),
    /// A raw statement (PRAGMA and friends) failed.
    QueryFailed(String),
    /// An invariant of the store itself was broken.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseConnectionFailed(msg) => write!(f, "Cannot open rota database: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Schema migration failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is disabled on this connection")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Conflict(msg) => write!(f, "Concurrent modification: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Duplicate value: {msg}"),
            Self::SwapAlreadyPending { shift_id } => {
                write!(f, "Shift {shift_id} already has a pending swap request")
            }
            Self::ReconstructionError(msg) => write!(f, "Corrupt stored value: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Statement failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound(String::from("No matching row")),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

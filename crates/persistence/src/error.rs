// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error type for the persistence layer.
//!
//! Storage failures are never retried here; every error propagates to the
//! caller, which decides how to surface it.

/// Errors raised by persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Opening the database connection failed.
    ConnectionFailed(String),
    /// Applying schema migrations failed.
    Migration(String),
    /// Connection setup (PRAGMA configuration) failed.
    Setup(String),
    /// The connection does not enforce foreign keys, so the schema's
    /// referential constraints would be silently ignored.
    ForeignKeysDisabled,
    /// A named query failed; carries the query name and the cause.
    QueryFailed(String),
    /// A storage-level constraint rejected a write.
    ConstraintViolation(String),
    /// A stored value could not be converted to its domain type.
    CorruptRecord(String),
    /// The named record does not exist.
    NotFound(String),
    /// The session token is unknown.
    SessionNotFound(String),
    /// The session's expiry has passed.
    SessionExpired(String),
    /// Any other database failure.
    Database(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "Could not open database: {msg}"),
            Self::Migration(msg) => write!(f, "Schema migration failed: {msg}"),
            Self::Setup(msg) => write!(f, "Connection setup failed: {msg}"),
            Self::ForeignKeysDisabled => {
                write!(f, "SQLite foreign key enforcement is switched off")
            }
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::SessionExpired(msg) => write!(f, "Session expired: {msg}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match err {
            Error::NotFound => Self::NotFound(String::from("Record not found")),
            Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::ConnectionFailed(err.to_string())
    }
}

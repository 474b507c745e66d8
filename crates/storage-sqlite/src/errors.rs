//! Storage-specific error types for SQLite operations.
//!
//! Wraps Diesel/r2d2 errors and converts them to the database-agnostic
//! types in `papertrade_core` at the crate boundary. Domain errors raised
//! inside a writer transaction (trade rejections, conflicts) pass through
//! unchanged so their HTTP mapping survives.

use diesel::result::Error as DieselError;
use papertrade_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-level errors, internal to this crate.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A domain error raised inside a transaction; carried through intact.
    #[error("{0}")]
    Domain(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Domain(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Domain(e) => e,
        }
    }
}

/// Extension trait to convert Diesel errors to core errors.
///
/// `From<DieselError> for Error` cannot exist here due to orphan rules,
/// so repositories call this instead.
pub trait DieselErrorExt {
    /// Convert to a core Error type.
    fn into_core_error(self) -> Error;
}

impl DieselErrorExt for DieselError {
    fn into_core_error(self) -> Error {
        StorageError::QueryFailed(self).into()
    }
}

impl DieselErrorExt for r2d2::Error {
    fn into_core_error(self) -> Error {
        StorageError::PoolError(self).into()
    }
}

impl DieselErrorExt for diesel::ConnectionError {
    fn into_core_error(self) -> Error {
        StorageError::ConnectionFailed(self).into()
    }
}

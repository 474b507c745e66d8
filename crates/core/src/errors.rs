//! Core error types for the papertrade application.
//!
//! This module defines database-agnostic error types. Storage-specific
//! errors (from Diesel, SQLite, etc.) are converted to these types by the
//! storage layer. Display strings are deliberately bare: they end up
//! verbatim in HTTP error bodies.

use papertrade_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the papertrade application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A uniqueness rule was violated (duplicate username or email).
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    Trade(#[from] TradeError),

    /// An upstream market data provider failed; the message passes through.
    #[error("{0}")]
    MarketData(#[from] MarketDataError),

    #[error("{0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// Uses `String` for all details so the storage layer can convert
/// Diesel/r2d2 errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

/// Business-rule rejections raised while executing an order.
///
/// The checks that produce these re-run inside the storage transaction, so
/// the carried numbers reflect the state the order was actually judged
/// against.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Insufficient funds")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Insufficient shares")]
    InsufficientShares {
        symbol: String,
        requested: i32,
        held: i32,
    },
}

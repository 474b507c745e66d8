//! SQLite storage implementation for Papertrade.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `papertrade-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for users, trading, and discussions
//! - Database-specific model types (with Diesel derives)
//!
//! This is the only crate in the workspace where Diesel dependencies
//! exist; everything above it works with traits.
//!
//! All mutations funnel through a single writer actor that wraps each job
//! in an immediate transaction. That one decision is what makes trades
//! atomic under concurrency: the funds/shares checks re-run inside the
//! writer's transaction, and concurrent orders against the same account
//! serialize behind its queue.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod discussions;
pub mod trading;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from papertrade-core for convenience
pub use papertrade_core::errors::{DatabaseError, Error, Result};

//! User repository and service traits.
//!
//! These traits define the contract for user operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Creates a new user.
    ///
    /// The implementation checks username/email uniqueness inside the same
    /// transaction as the insert and returns `Error::ConstraintViolation`
    /// on a duplicate.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Retrieves a user by id.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Retrieves a user by username, or `None` when unknown.
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Registers a new user with business validation.
    async fn register(&self, new_user: NewUser) -> Result<User>;

    /// Retrieves a user by id.
    fn get_user(&self, user_id: &str) -> Result<User>;

    /// Retrieves a user by username, or `None` when unknown.
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;
}

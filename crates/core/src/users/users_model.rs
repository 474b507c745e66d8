//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Argon2 hash of the password, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Cash balance in account currency
    pub balance: f64,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new user.
///
/// The password arrives here already hashed; hashing is the HTTP layer's
/// concern.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        if self.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str, hash: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash.to_string(),
        }
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(new_user("alice", "alice@example.com", "$argon2id$x").validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert!(new_user("", "alice@example.com", "h").validate().is_err());
        assert!(new_user("alice", "  ", "h").validate().is_err());
        assert!(new_user("alice", "alice@example.com", "").validate().is_err());
    }
}

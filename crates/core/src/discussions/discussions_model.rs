//! Discussion board domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A posted message, annotated with its author's username for display.
/// Messages are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageWithAuthor {
    pub id: String,
    pub content: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

/// Input model for posting a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub user_id: String,
    pub content: String,
}

impl NewMessage {
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(
                ValidationError::InvalidInput("Message content is required".to_string()).into(),
            );
        }
        Ok(())
    }
}

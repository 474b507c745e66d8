//! Discussion repository and service traits.

use async_trait::async_trait;

use super::discussions_model::{MessageWithAuthor, NewMessage};
use crate::errors::Result;

/// Trait defining the contract for message persistence.
#[async_trait]
pub trait DiscussionRepositoryTrait: Send + Sync {
    /// Appends a message and returns it annotated with the author.
    async fn create(&self, new_message: NewMessage) -> Result<MessageWithAuthor>;

    /// Lists the most recent messages, newest first.
    fn list_recent(&self, limit: i64) -> Result<Vec<MessageWithAuthor>>;
}

/// Trait defining the contract for the discussion board.
#[async_trait]
pub trait DiscussionServiceTrait: Send + Sync {
    /// Validates and posts a message.
    async fn post_message(&self, user_id: &str, content: &str) -> Result<MessageWithAuthor>;

    /// Returns the most recent messages, newest first.
    fn list_messages(&self) -> Result<Vec<MessageWithAuthor>>;
}

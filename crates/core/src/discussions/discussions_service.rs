use std::sync::Arc;

use async_trait::async_trait;

use super::discussions_model::{MessageWithAuthor, NewMessage};
use super::discussions_traits::{DiscussionRepositoryTrait, DiscussionServiceTrait};
use crate::constants::MESSAGE_FEED_LIMIT;
use crate::errors::Result;

/// Service for the discussion board.
pub struct DiscussionService {
    repository: Arc<dyn DiscussionRepositoryTrait>,
}

impl DiscussionService {
    /// Creates a new DiscussionService instance
    pub fn new(repository: Arc<dyn DiscussionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl DiscussionServiceTrait for DiscussionService {
    async fn post_message(&self, user_id: &str, content: &str) -> Result<MessageWithAuthor> {
        let new_message = NewMessage {
            user_id: user_id.to_string(),
            content: content.to_string(),
        };
        new_message.validate()?;
        self.repository.create(new_message).await
    }

    fn list_messages(&self) -> Result<Vec<MessageWithAuthor>> {
        self.repository.list_recent(MESSAGE_FEED_LIMIT)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::{messages, users};

use super::model::{MessageDB, MessageFeedRow};
use papertrade_core::discussions::{DiscussionRepositoryTrait, MessageWithAuthor, NewMessage};
use papertrade_core::errors::Result;

/// Repository for the append-only message log.
pub struct DiscussionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DiscussionRepository {
    /// Creates a new DiscussionRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DiscussionRepositoryTrait for DiscussionRepository {
    async fn create(&self, new_message: NewMessage) -> Result<MessageWithAuthor> {
        self.writer
            .exec(move |conn| {
                let author: String = users::table
                    .find(&new_message.user_id)
                    .select(users::username)
                    .first(conn)
                    .map_err(|e| e.into_core_error())?;

                let message_db: MessageDB = new_message.into();
                diesel::insert_into(messages::table)
                    .values(&message_db)
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;

                Ok(MessageWithAuthor {
                    id: message_db.id,
                    content: message_db.content,
                    username: author,
                    created_at: message_db.created_at,
                })
            })
            .await
    }

    fn list_recent(&self, limit: i64) -> Result<Vec<MessageWithAuthor>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = messages::table
            .inner_join(users::table)
            .select((
                messages::id,
                messages::content,
                users::username,
                messages::created_at,
            ))
            .order(messages::created_at.desc())
            .limit(limit)
            .load::<MessageFeedRow>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(MessageWithAuthor::from).collect())
    }
}

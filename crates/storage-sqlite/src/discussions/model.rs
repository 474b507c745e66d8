//! Database models for discussion messages.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use papertrade_core::discussions::{MessageWithAuthor, NewMessage};

/// Database model for messages
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MessageDB {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl From<NewMessage> for MessageDB {
    fn from(domain: NewMessage) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            content: domain.content,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// One feed row: a message joined with its author's username.
#[derive(Queryable, Debug, Clone)]
pub struct MessageFeedRow {
    pub id: String,
    pub content: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

impl From<MessageFeedRow> for MessageWithAuthor {
    fn from(row: MessageFeedRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use papertrade_core::users::{NewUser, User};

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub balance: f64,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
            balance: db.balance,
            created_at: db.created_at,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        Self {
            // The repository assigns the id right before insert
            id: String::new(),
            username: domain.username,
            email: domain.email,
            password_hash: domain.password_hash,
            balance: 0.0,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

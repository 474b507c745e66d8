use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::users;

use super::model::UserDB;
use papertrade_core::errors::{Error, Result};
use papertrade_core::users::{NewUser, User, UserRepositoryTrait};

/// Repository for managing user data in the database
pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    /// Creates a user. The uniqueness checks and the insert share the
    /// writer's transaction, so concurrent registrations cannot both pass.
    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn| {
                let username_taken: i64 = users::table
                    .filter(users::username.eq(&new_user.username))
                    .count()
                    .get_result(conn)
                    .map_err(|e| e.into_core_error())?;
                if username_taken > 0 {
                    return Err(Error::ConstraintViolation(
                        "Username already exists".to_string(),
                    ));
                }

                let email_taken: i64 = users::table
                    .filter(users::email.eq(&new_user.email))
                    .count()
                    .get_result(conn)
                    .map_err(|e| e.into_core_error())?;
                if email_taken > 0 {
                    return Err(Error::ConstraintViolation(
                        "Email already exists".to_string(),
                    ));
                }

                let mut user_db: UserDB = new_user.into();
                user_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;

                Ok(user_db.into())
            })
            .await
    }

    /// Retrieves a user by id
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user = users::table
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(user.into())
    }

    /// Retrieves a user by username
    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let user = users::table
            .select(UserDB::as_select())
            .filter(users::username.eq(username))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(|e| e.into_core_error())?;

        Ok(user.map(User::from))
    }
}

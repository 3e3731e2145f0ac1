use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use crate::accounts::AccountRepository;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::schema::users::dsl::*;

use super::model::UserDB;
use papertrade_core::accounts::{Account, NewAccount};
use papertrade_core::errors::Result;
use papertrade_core::users::{NewUser, User, UserRepositoryTrait};

/// Repository for users and their credentials.
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn register(&self, new_user: NewUser, new_account: NewAccount) -> Result<(User, Account)> {
        new_user.validate()?;

        self.writer
            .exec(move |conn| {
                let user_db: UserDB = new_user.into();
                // A taken username surfaces as UniqueViolation and rolls back the job.
                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .into_core()?;

                let account = AccountRepository::insert_account(conn, new_account)?;
                debug!("Inserted user {} and their account", user_db.username);
                Ok((User::from(user_db), account))
            })
            .await
    }

    fn find_by_username(&self, name: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let found = users
            .select(UserDB::as_select())
            .filter(username.eq(name))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(found.map(User::from))
    }

    fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let found = users
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(found.map(User::from))
    }
}

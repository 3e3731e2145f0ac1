//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use papertrade_core::users::{NewUser, User};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            created_at: db.created_at.and_utc(),
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        Self {
            id: domain.id,
            username: domain.username,
            password_hash: domain.password_hash,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

//! User repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::users_model::{NewUser, User};
use crate::accounts::{Account, NewAccount};
use crate::errors::Result;

/// Persistence contract for users.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts the user and their account atomically.
    ///
    /// Fails with `DatabaseError::UniqueViolation` when the username is taken.
    async fn register(&self, new_user: NewUser, new_account: NewAccount) -> Result<(User, Account)>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    fn get_by_id(&self, user_id: &str) -> Result<Option<User>>;
}

/// Registration and lookup. Password hashing happens in the caller; this
/// service only ever sees hashes.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Creates a user together with an account funded with the starting cash.
    async fn register(&self, username: &str, password_hash: String) -> Result<(User, Account)>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    fn starting_cash(&self) -> Decimal;
}

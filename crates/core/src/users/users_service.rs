use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::users_model::{normalize_username, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::accounts::{Account, NewAccount};
use crate::errors::{DatabaseError, Result};
use crate::utils::money::round_currency;

/// Service for registering users and opening their accounts.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    starting_cash: Decimal,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, starting_cash: Decimal) -> Self {
        Self {
            repository,
            starting_cash: round_currency(starting_cash),
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, username: &str, password_hash: String) -> Result<(User, Account)> {
        let username = normalize_username(username);
        let new_user = NewUser {
            id: Uuid::new_v4().to_string(),
            username: username.clone(),
            password_hash,
        };
        new_user.validate()?;

        if self.repository.find_by_username(&username)?.is_some() {
            return Err(DatabaseError::UniqueViolation(format!(
                "username '{}' is already taken",
                username
            ))
            .into());
        }

        let new_account = NewAccount::with_starting_cash(
            new_user.id.clone(),
            username.clone(),
            self.starting_cash,
            Utc::now(),
        );
        new_account.validate()?;

        let (user, account) = self.repository.register(new_user, new_account).await?;
        info!("Registered user {} with {} starting cash", user.username, account.cash);
        Ok((user, account))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository
            .find_by_username(&normalize_username(username))
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.repository.get_by_id(user_id)
    }

    fn starting_cash(&self) -> Decimal {
        self.starting_cash
    }
}

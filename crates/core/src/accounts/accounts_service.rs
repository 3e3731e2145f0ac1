use log::debug;
use std::sync::Arc;

use super::accounts_model::Account;
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{DatabaseError, Result};
use crate::session::SessionContext;

/// Service for reading accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    /// Retrieves the account owned by the session's user
    fn get_account(&self, session: &SessionContext) -> Result<Account> {
        debug!("Loading account for user {}", session.user_id);
        self.repository
            .get_by_user_id(&session.user_id)?
            .ok_or_else(|| DatabaseError::NotFound(format!("account {}", session.user_id)).into())
    }
}

//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountHoldingsUpdate, NewAccount, ValuationHistoryUpdate};
use crate::errors::Result;
use crate::session::SessionContext;

/// Trait defining the contract for Account repository operations.
///
/// Implementations of this trait handle the persistence of account data.
/// The trait is database-agnostic - storage-specific details are handled
/// by concrete implementations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Retrieves the account owned by `user_id`, or `None` when there is none.
    fn get_by_user_id(&self, user_id: &str) -> Result<Option<Account>>;

    /// Replaces cash and holdings after a trade.
    async fn update_holdings(&self, user_id: &str, update: AccountHoldingsUpdate)
        -> Result<Account>;

    /// Replaces the valuation history and its timestamp after a revaluation.
    async fn update_valuation_history(
        &self,
        user_id: &str,
        update: ValuationHistoryUpdate,
    ) -> Result<Account>;

    /// Lists every account.
    fn list_all(&self) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Retrieves the caller's account, failing with `NotFound` when missing.
    fn get_account(&self, session: &SessionContext) -> Result<Account>;
}

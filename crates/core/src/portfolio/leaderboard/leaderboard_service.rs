use std::sync::Arc;

use async_trait::async_trait;

use super::leaderboard_model::LeaderboardEntry;
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::Result;

#[async_trait]
pub trait LeaderboardServiceTrait: Send + Sync {
    fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
}

pub struct LeaderboardService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl LeaderboardService {
    pub fn new(account_repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { account_repository }
    }
}

#[async_trait]
impl LeaderboardServiceTrait for LeaderboardService {
    fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let accounts = self.account_repository.list_all()?;
        Ok(build_leaderboard(&accounts))
    }
}

/// Ranks accounts by their latest recorded valuation, highest first; equal
/// values are ordered by display name.
pub fn build_leaderboard(accounts: &[Account]) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&Account> = accounts.iter().collect();
    ranked.sort_by(|a, b| {
        b.latest_valuation()
            .cmp(&a.latest_valuation())
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, account)| LeaderboardEntry {
            rank: i + 1,
            display_name: account.display_name.clone(),
            latest_value: account.latest_valuation(),
            cash: account.cash,
            history: account.valuation_history.clone(),
        })
        .collect()
}

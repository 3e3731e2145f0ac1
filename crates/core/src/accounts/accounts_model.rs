//! Account domain models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A position in a single ticker.
///
/// `cost_basis` is the cumulative value transacted in this ticker, not a
/// per-share figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub share_count: i64,
    pub cost_basis: Decimal,
    pub display_name: String,
}

/// Domain model representing a user's trading account.
///
/// The account is keyed by its owner's `user_id`. Holdings are kept in a
/// sorted map so iteration order, and therefore valuation, is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    pub display_name: String,
    pub cash: Decimal,
    pub holdings: BTreeMap<String, Holding>,
    /// One total per revaluation cycle, oldest first. Entries are never rewritten.
    pub valuation_history: Vec<Decimal>,
    pub last_revalued_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Latest recorded valuation, falling back to cash when nothing has been
    /// recorded yet.
    pub fn latest_valuation(&self) -> Decimal {
        self.valuation_history.last().copied().unwrap_or(self.cash)
    }

    pub fn holding(&self, ticker: &str) -> Option<&Holding> {
        self.holdings.get(ticker)
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub display_name: String,
    pub cash: Decimal,
    pub valuation_history: Vec<Decimal>,
    pub last_revalued_at: DateTime<Utc>,
}

impl NewAccount {
    /// A fresh account holding only `starting_cash`, whose first valuation
    /// snapshot is that same amount.
    pub fn with_starting_cash(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        starting_cash: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            cash: starting_cash,
            valuation_history: vec![starting_cash],
            last_revalued_at: now,
        }
    }

    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.display_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Display name cannot be empty".to_string(),
            )));
        }
        if self.cash.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Starting cash cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Cash and holdings written back after a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountHoldingsUpdate {
    pub cash: Decimal,
    pub holdings: BTreeMap<String, Holding>,
}

impl From<&Account> for AccountHoldingsUpdate {
    fn from(account: &Account) -> Self {
        Self {
            cash: account.cash,
            holdings: account.holdings.clone(),
        }
    }
}

/// Full valuation history and timestamp written back after a revaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationHistoryUpdate {
    pub valuation_history: Vec<Decimal>,
    pub last_revalued_at: DateTime<Utc>,
}

impl From<&Account> for ValuationHistoryUpdate {
    fn from(account: &Account) -> Self {
        Self {
            valuation_history: account.valuation_history.clone(),
            last_revalued_at: account.last_revalued_at,
        }
    }
}

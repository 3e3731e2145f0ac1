//! Engine settings supplied by the host application.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_QUOTE_TIMEOUT_MS, DEFAULT_REVALUATION_CONCURRENCY, DEFAULT_STARTING_CASH,
};

/// Tunables for registration, quote fetching and revaluation.
///
/// Core services take these as constructor parameters and never read the
/// environment themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSettings {
    pub starting_cash: Decimal,
    pub quote_timeout: Duration,
    pub revaluation_concurrency: usize,
}

impl Default for TradingSettings {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            quote_timeout: Duration::from_millis(DEFAULT_QUOTE_TIMEOUT_MS),
            revaluation_concurrency: DEFAULT_REVALUATION_CONCURRENCY,
        }
    }
}

impl TradingSettings {
    /// Concurrency used for revaluation sweeps, never below one.
    pub fn effective_concurrency(&self) -> usize {
        self.revaluation_concurrency.max(1)
    }
}

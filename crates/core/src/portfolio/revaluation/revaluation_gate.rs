use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::{exchange_date, is_market_open};

/// Whether an account may be revalued at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevaluationDecision {
    Revalue,
    /// Prices are moving; wait for the close.
    MarketOpen,
    /// A snapshot was already recorded on this exchange trading day.
    UpToDate,
}

/// Decides whether an account last revalued at `last_revalued_at` should be
/// revalued at `now`. Both gates use exchange-local time: the market must be
/// closed, and the two instants must fall on different exchange dates.
pub fn revaluation_decision(
    last_revalued_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> RevaluationDecision {
    if is_market_open(now) {
        RevaluationDecision::MarketOpen
    } else if exchange_date(last_revalued_at) == exchange_date(now) {
        RevaluationDecision::UpToDate
    } else {
        RevaluationDecision::Revalue
    }
}

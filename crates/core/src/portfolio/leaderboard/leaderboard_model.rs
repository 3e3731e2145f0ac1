use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub display_name: String,
    /// Latest recorded valuation, not a live one
    pub latest_value: Decimal,
    pub cash: Decimal,
    pub history: Vec<Decimal>,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a holding's gain or loss against its cost basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Performance {
    Gain,
    Loss,
    Unchanged,
}

impl Performance {
    pub fn from_gain_loss(gain_loss: Decimal) -> Self {
        if gain_loss > Decimal::ZERO {
            Performance::Gain
        } else if gain_loss < Decimal::ZERO {
            Performance::Loss
        } else {
            Performance::Unchanged
        }
    }
}

/// Live valuation of a single holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub ticker: String,
    pub display_name: String,
    pub shares: i64,
    /// cost basis divided by shares, display only
    pub avg_cost: Decimal,
    pub cost_basis: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub gain_loss: Decimal,
    pub performance: Performance,
}

/// Live valuation of a whole account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountValuation {
    pub total_value: Decimal,
    pub cash_value: Decimal,
    pub holdings: Vec<HoldingValuation>,
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Buy or sell, derived from the sign of the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// `None` for a zero amount.
    pub fn from_signed_amount(signed_amount: i64) -> Option<Self> {
        match signed_amount.signum() {
            1 => Some(TradeSide::Buy),
            -1 => Some(TradeSide::Sell),
            _ => None,
        }
    }
}

/// A trade as submitted by a user: positive amounts buy, negative amounts sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub ticker: String,
    pub amount: i64,
}

/// Confirmation of an executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReceipt {
    pub ticker: String,
    pub display_name: String,
    pub side: TradeSide,
    pub shares: i64,
    pub price: Decimal,
    pub trade_value: Decimal,
    pub cash_after: Decimal,
    /// Shares of the ticker still held after the trade; zero after a full liquidation.
    pub shares_after: i64,
    pub executed_at: DateTime<Utc>,
}

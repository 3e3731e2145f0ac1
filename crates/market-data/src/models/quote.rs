use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest market quote for a single ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Normalized ticker symbol (uppercase, trimmed)
    pub symbol: String,

    /// Current price per share
    pub price: Decimal,

    /// Human-readable company name as reported by the provider
    pub display_name: String,

    /// Quote currency
    pub currency: String,

    /// When the provider priced this quote
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Create a quote with the current time as its timestamp.
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        display_name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            display_name: display_name.into(),
            currency: currency.into(),
            timestamp: Utc::now(),
        }
    }

    /// A quote is usable for trading when it names a symbol and carries a positive price.
    pub fn is_tradable(&self) -> bool {
        !self.symbol.is_empty() && self.price > Decimal::ZERO
    }
}

/// Normalize a user-supplied ticker: trim surrounding whitespace and uppercase it.
///
/// ```
/// use papertrade_market_data::normalize_symbol;
///
/// assert_eq!(normalize_symbol("  aapl "), "AAPL");
/// ```
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("msft"), "MSFT");
        assert_eq!(normalize_symbol("\tbrk-b\n"), "BRK-B");
        assert_eq!(normalize_symbol("   "), "");
    }

    #[test]
    fn test_is_tradable() {
        assert!(Quote::new("AAPL", dec!(189.50), "Apple Inc.", "USD").is_tradable());
        assert!(!Quote::new("AAPL", dec!(0), "Apple Inc.", "USD").is_tradable());
        assert!(!Quote::new("AAPL", dec!(-1), "Apple Inc.", "USD").is_tradable());
        assert!(!Quote::new("", dec!(10), "", "USD").is_tradable());
    }

    #[test]
    fn test_serializes_camel_case() {
        let quote = Quote::new("AAPL", dec!(189.5), "Apple Inc.", "USD");
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["displayName"], "Apple Inc.");
        assert_eq!(json["symbol"], "AAPL");
    }
}

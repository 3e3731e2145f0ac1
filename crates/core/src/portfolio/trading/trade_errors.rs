use papertrade_market_data::RetryClass;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a trade is rejected. A rejected trade never changes stored state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Trade amount must be a non-zero whole number of shares")]
    InvalidAmount,

    #[error("Quote unavailable for {ticker}: {reason}")]
    QuoteUnavailable {
        ticker: String,
        reason: String,
        retry_class: RetryClass,
    },

    #[error("Insufficient shares of {ticker}: need {required}, hold {available}")]
    InsufficientShares {
        ticker: String,
        required: i64,
        available: i64,
    },

    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Failed to persist trade: {0}")]
    PersistenceFailed(String),

    #[error("Account not found for user {0}")]
    AccountNotFound(String),
}

impl TradeError {
    /// Expected outcomes of a well-formed request that the user can fix.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TradeError::InvalidAmount
                | TradeError::InsufficientShares { .. }
                | TradeError::InsufficientFunds { .. }
        )
    }

    /// True when repeating the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            TradeError::QuoteUnavailable { retry_class, .. } => retry_class.is_retryable(),
            TradeError::PersistenceFailed(_) => true,
            _ => false,
        }
    }
}

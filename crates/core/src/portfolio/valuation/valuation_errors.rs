use thiserror::Error;

/// Errors raised while valuing an account.
#[derive(Error, Debug)]
pub enum ValuationError {
    /// The quote map handed to the calculator has no entry for a held ticker.
    #[error("No quote supplied for held ticker {0}")]
    MissingQuote(String),

    /// Fetching a live quote for a held ticker failed.
    #[error("Quote unavailable for {ticker}: {reason}")]
    QuoteUnavailable { ticker: String, reason: String },

    #[error("Account not found for user {0}")]
    AccountNotFound(String),
}

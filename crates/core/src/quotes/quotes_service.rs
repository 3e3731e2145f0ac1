use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use papertrade_market_data::{normalize_symbol, MarketDataError, MarketDataProvider, Quote};

/// Fetches the latest quote for a ticker.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Returns a tradable quote for `symbol`.
    ///
    /// The symbol is normalized first. Quotes with a non-positive price are
    /// rejected with `MarketDataError::ValidationFailed`; a fetch that runs past
    /// the configured timeout fails with `MarketDataError::Timeout`.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}

/// Quote service backed by a single market data provider.
pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
    timeout: Duration,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(MarketDataError::ValidationFailed {
                message: "Ticker symbol is empty".to_string(),
            });
        }

        debug!("Fetching quote for {} via {}", symbol, self.provider.id());
        let mut quote = tokio::time::timeout(self.timeout, self.provider.get_latest_quote(&symbol))
            .await
            .map_err(|_| {
                warn!(
                    "Quote fetch for {} timed out after {:?}",
                    symbol, self.timeout
                );
                MarketDataError::Timeout {
                    provider: self.provider.id().to_string(),
                }
            })??;

        // Holdings are keyed by the ticker the caller asked for.
        quote.symbol = symbol;
        if !quote.is_tradable() {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Quote for {} has non-positive price {}", quote.symbol, quote.price),
            });
        }
        Ok(quote)
    }
}

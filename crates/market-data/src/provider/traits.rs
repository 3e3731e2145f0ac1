//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source. Services hold
/// providers as `Arc<dyn MarketDataProvider>` so tests can swap in a stub.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use papertrade_market_data::{MarketDataError, MarketDataProvider, Quote};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Ok(Quote::new(symbol, dec!(100), symbol, "USD"))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and errors.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a ticker.
    ///
    /// `symbol` is expected to be normalized already. Implementations return
    /// [`MarketDataError::SymbolNotFound`] when the provider does not know it.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}

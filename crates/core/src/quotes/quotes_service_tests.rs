//! Tests for QuoteService normalization, validation and timeouts.

#[cfg(test)]
mod tests {
    use crate::quotes::{QuoteService, QuoteServiceTrait};
    use crate::test_support::MockQuoteProvider;
    use async_trait::async_trait;
    use papertrade_market_data::{MarketDataError, MarketDataProvider, Quote, RetryClass};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    struct SlowProvider;

    #[async_trait]
    impl MarketDataProvider for SlowProvider {
        fn id(&self) -> &'static str {
            "SLOW"
        }

        async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Quote::new(symbol, dec!(1), symbol, "USD"))
        }
    }

    fn service(provider: MockQuoteProvider) -> QuoteService {
        QuoteService::new(Arc::new(provider), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_normalizes_symbol_before_fetching() {
        let provider = MockQuoteProvider::new().with_price("AAPL", dec!(190.25));
        let quote = service(provider).get_latest_quote(" aapl ").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, dec!(190.25));
    }

    #[tokio::test]
    async fn test_empty_symbol_is_rejected_without_fetch() {
        let provider = MockQuoteProvider::new();
        let svc = service(provider.clone());
        let err = svc.get_latest_quote("   ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_price_is_rejected() {
        let provider = MockQuoteProvider::new().with_price("DEAD", dec!(0));
        let err = service(provider).get_latest_quote("DEAD").await.unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn test_unknown_symbol_propagates_not_found() {
        let err = service(MockQuoteProvider::new())
            .get_latest_quote("NOPE")
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let svc = QuoteService::new(Arc::new(SlowProvider), Duration::from_millis(100));
        let err = svc.get_latest_quote("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Timeout { .. }));
        assert_eq!(err.retry_class(), RetryClass::WithBackoff);
    }
}

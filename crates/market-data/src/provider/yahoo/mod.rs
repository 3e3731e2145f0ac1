//! Yahoo Finance market data provider.
//!
//! Latest prices and company names come from the quoteSummary `price` module,
//! which requires a cookie/crumb pair obtained once and cached per provider.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{header, StatusCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

use models::YahooQuoteSummaryResponse;

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider whose HTTP calls give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| provider_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            crumb: RwLock::new(None),
        })
    }

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get(COOKIE_URL)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let response = self
            .client
            .get(CRUMB_URL)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(classify_transport_error)?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        let crumb = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        let crumb_data = CrumbData { cookie, crumb };
        *self.crumb.write().await = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    async fn fetch_price_summary(&self, symbol: &str) -> Result<FetchOutcome, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "{}/{}?modules=price&crumb={}",
            QUOTE_SUMMARY_URL,
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(classify_transport_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.clear_crumb().await;
                return Ok(FetchOutcome::AuthExpired);
            }
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            status if !status.is_success() => {
                return Err(provider_error(format!("Unexpected status {}", status)));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse quote response: {}", e)))?;

        parse_price_summary(symbol, data).map(FetchOutcome::Quote)
    }
}

enum FetchOutcome {
    Quote(Quote),
    AuthExpired,
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching latest quote for {} from Yahoo", symbol);

        if let FetchOutcome::Quote(quote) = self.fetch_price_summary(symbol).await? {
            return Ok(quote);
        }

        // The crumb was cleared; one retry with a fresh one.
        warn!("Yahoo crumb rejected for {}, refreshing", symbol);
        match self.fetch_price_summary(symbol).await? {
            FetchOutcome::Quote(quote) => Ok(quote),
            FetchOutcome::AuthExpired => Err(provider_error("Yahoo authentication expired")),
        }
    }
}

/// Map a quoteSummary `price` module to a [`Quote`].
fn parse_price_summary(
    symbol: &str,
    data: YahooQuoteSummaryResponse,
) -> Result<Quote, MarketDataError> {
    let summary = data.quote_summary;
    if let Some(error) = summary.error {
        let detail = error
            .description
            .or_else(|| error.code.clone())
            .unwrap_or_default();
        debug!("Yahoo quoteSummary error for {}: {}", symbol, detail);
        return Err(match error.code.as_deref() {
            Some("Not Found") | None => MarketDataError::SymbolNotFound(symbol.to_string()),
            Some(_) => provider_error(detail),
        });
    }

    let price = summary
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|r| r.price)
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let value = price
        .regular_market_price
        .as_ref()
        .and_then(|p| p.raw)
        .and_then(Decimal::from_f64)
        .ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("No valid price for {}", symbol),
        })?;
    if value <= Decimal::ZERO {
        return Err(MarketDataError::ValidationFailed {
            message: format!("Non-positive price {} for {}", value, symbol),
        });
    }

    let display_name = price
        .long_name
        .or(price.short_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| symbol.to_string());

    let timestamp = price
        .regular_market_time
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Utc::now);

    Ok(Quote {
        symbol: price.symbol.unwrap_or_else(|| symbol.to_string()),
        price: value.normalize(),
        display_name,
        currency: price.currency.unwrap_or_else(|| "USD".to_string()),
        timestamp,
    })
}

fn provider_error(message: impl Into<String>) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

fn classify_transport_error(error: reqwest::Error) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(error)
    }
}

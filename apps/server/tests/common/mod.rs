#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use papertrade_core::settings::TradingSettings;
use papertrade_market_data::{MarketDataError, MarketDataProvider, Quote};
use papertrade_server::{api::app_router, build_state_with_provider, config::Config};
use rust_decimal::Decimal;
use tempfile::TempDir;
use tower::ServiceExt;

/// Fixed-price quote source so tests never reach the network.
#[derive(Clone, Default)]
pub struct StubProvider {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
}

impl StubProvider {
    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_string(), price);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let price = self
            .prices
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
        Ok(Quote::new(symbol, price, format!("{symbol} Inc."), "USD"))
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        secret_key: Some("!".repeat(32)),
        token_ttl: Duration::from_secs(3600),
        revaluation_interval: Duration::from_secs(900),
        trading: TradingSettings::default(),
    }
}

pub async fn build_test_router(dir: &TempDir, provider: StubProvider) -> Router {
    let config = test_config(dir);
    let state = build_state_with_provider(&config, Arc::new(provider))
        .await
        .unwrap();
    app_router(state, &config)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

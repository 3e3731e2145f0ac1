use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use papertrade_core::settings::TradingSettings;
use rust_decimal::Decimal;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw JWT secret; a random one is generated per process when unset.
    pub secret_key: Option<String>,
    pub token_ttl: Duration,
    pub revaluation_interval: Duration,
    pub trading: TradingSettings,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: expected a whole number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = TradingSettings::default();

        let listen_addr: SocketAddr = env_or("PT_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid PT_LISTEN_ADDR")?;
        let db_path = env_or("PT_DB_PATH", "./db/papertrade.db");
        let cors_allow = env_or("PT_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let secret_key = std::env::var("PT_SECRET_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let starting_cash = match std::env::var("PT_STARTING_CASH") {
            Ok(raw) => Decimal::from_str(raw.trim())
                .with_context(|| format!("Invalid PT_STARTING_CASH '{raw}'"))?,
            Err(_) => defaults.starting_cash,
        };
        if starting_cash.is_sign_negative() {
            anyhow::bail!("PT_STARTING_CASH cannot be negative");
        }

        let trading = TradingSettings {
            starting_cash,
            quote_timeout: Duration::from_millis(env_u64(
                "PT_QUOTE_TIMEOUT_MS",
                defaults.quote_timeout.as_millis() as u64,
            )?),
            revaluation_concurrency: env_u64(
                "PT_REVALUATION_CONCURRENCY",
                defaults.revaluation_concurrency as u64,
            )? as usize,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(env_u64("PT_REQUEST_TIMEOUT_MS", 30_000)?),
            secret_key,
            token_ttl: Duration::from_secs(env_u64("PT_TOKEN_TTL_SECS", 24 * 60 * 60)?),
            revaluation_interval: Duration::from_secs(env_u64(
                "PT_REVALUATION_INTERVAL_SECS",
                15 * 60,
            )?),
            trading,
        })
    }
}

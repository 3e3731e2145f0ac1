use std::sync::Arc;

use papertrade_core::{
    accounts::{AccountService, AccountServiceTrait},
    portfolio::{
        leaderboard::{LeaderboardService, LeaderboardServiceTrait},
        revaluation::{RevaluationService, RevaluationServiceTrait},
        trading::{AccountLocks, TradeService, TradeServiceTrait},
        valuation::{ValuationService, ValuationServiceTrait},
    },
    quotes::{QuoteService, QuoteServiceTrait},
    users::{UserService, UserServiceTrait},
};
use papertrade_market_data::{MarketDataProvider, YahooProvider};
use papertrade_storage_sqlite::{
    accounts::AccountRepository,
    db::{self, write_actor},
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
    pub trade_service: Arc<dyn TradeServiceTrait>,
    pub revaluation_service: Arc<dyn RevaluationServiceTrait>,
    pub leaderboard_service: Arc<dyn LeaderboardServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the application state against live Yahoo Finance quotes.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(YahooProvider::new(config.trading.quote_timeout)?);
    build_state_with_provider(config, provider).await
}

/// Builds the application state with an explicit quote provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let settings = &config.trading;
    tracing::info!(
        "Using {} quotes (timeout {:?}), starting cash {}",
        provider.id(),
        settings.quote_timeout,
        settings.starting_cash
    );
    let quote_service: Arc<dyn QuoteServiceTrait> =
        Arc::new(QuoteService::new(provider, settings.quote_timeout));

    // Trades and revaluation share one lock registry so they never interleave
    // on the same account.
    let locks = AccountLocks::new();

    let account_service: Arc<dyn AccountServiceTrait> =
        Arc::new(AccountService::new(account_repo.clone()));
    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repo, settings.starting_cash));
    let valuation_service: Arc<dyn ValuationServiceTrait> = Arc::new(ValuationService::new(
        account_repo.clone(),
        quote_service.clone(),
    ));
    let trade_service: Arc<dyn TradeServiceTrait> = Arc::new(TradeService::new(
        account_repo.clone(),
        quote_service.clone(),
        locks.clone(),
    ));
    let revaluation_service: Arc<dyn RevaluationServiceTrait> =
        Arc::new(RevaluationService::new(
            account_repo.clone(),
            quote_service.clone(),
            locks,
            settings.effective_concurrency(),
        ));
    let leaderboard_service: Arc<dyn LeaderboardServiceTrait> =
        Arc::new(LeaderboardService::new(account_repo));

    let auth = Arc::new(AuthManager::from_secret(
        config.secret_key.as_deref(),
        config.token_ttl,
    )?);

    Ok(Arc::new(AppState {
        account_service,
        user_service,
        valuation_service,
        trade_service,
        revaluation_service,
        leaderboard_service,
        quote_service,
        auth,
    }))
}

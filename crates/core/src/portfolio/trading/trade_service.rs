use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{error, info, warn};

use super::account_locks::AccountLocks;
use super::trade_calculator::{apply_trade, trade_value};
use super::trade_errors::TradeError;
use super::trade_model::{TradeReceipt, TradeSide};
use crate::accounts::{AccountHoldingsUpdate, AccountRepositoryTrait};
use crate::quotes::{normalize_symbol, QuoteServiceTrait};
use crate::session::SessionContext;
use crate::utils::money::round_currency;

#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    /// Buys (`signed_amount > 0`) or sells (`signed_amount < 0`) whole shares
    /// of `ticker` for the session's account at the live price.
    ///
    /// Either the new cash and holdings are stored and a receipt is returned,
    /// or nothing is written.
    async fn execute_trade(
        &self,
        session: &SessionContext,
        ticker: &str,
        signed_amount: i64,
    ) -> Result<TradeReceipt, TradeError>;
}

pub struct TradeService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    locks: AccountLocks,
}

impl TradeService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        locks: AccountLocks,
    ) -> Self {
        Self {
            account_repository,
            quote_service,
            locks,
        }
    }
}

#[async_trait]
impl TradeServiceTrait for TradeService {
    async fn execute_trade(
        &self,
        session: &SessionContext,
        ticker: &str,
        signed_amount: i64,
    ) -> Result<TradeReceipt, TradeError> {
        let side = TradeSide::from_signed_amount(signed_amount).ok_or(TradeError::InvalidAmount)?;
        let user_id = session.user_id.as_str();

        let _guard = self.locks.lock(user_id).await;

        let account = self
            .account_repository
            .get_by_user_id(user_id)
            .map_err(|e| TradeError::PersistenceFailed(e.to_string()))?
            .ok_or_else(|| TradeError::AccountNotFound(user_id.to_string()))?;

        let quote = self
            .quote_service
            .get_latest_quote(ticker)
            .await
            .map_err(|e| {
                warn!("Trade for {} rejected, no quote for {}: {}", user_id, ticker, e);
                TradeError::QuoteUnavailable {
                    ticker: normalize_symbol(ticker),
                    reason: e.to_string(),
                    retry_class: e.retry_class(),
                }
            })?;

        let updated = apply_trade(&account, &quote, signed_amount)?;

        self.account_repository
            .update_holdings(user_id, AccountHoldingsUpdate::from(&updated))
            .await
            .map_err(|e| {
                error!("Failed to persist trade for {}: {}", user_id, e);
                TradeError::PersistenceFailed(e.to_string())
            })?;

        let shares = signed_amount.abs();
        let receipt = TradeReceipt {
            ticker: quote.symbol.clone(),
            display_name: quote.display_name.clone(),
            side,
            shares,
            price: quote.price,
            trade_value: trade_value(&quote, shares)
                .map(round_currency)
                .unwrap_or_default(),
            cash_after: updated.cash,
            shares_after: updated
                .holding(&quote.symbol)
                .map_or(0, |h| h.share_count),
            executed_at: Utc::now(),
        };
        info!(
            "{:?} {} {} @ {} for {} (cash now {})",
            receipt.side, receipt.shares, receipt.ticker, receipt.price, user_id, receipt.cash_after
        );
        Ok(receipt)
    }
}

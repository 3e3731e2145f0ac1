use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::valuation_calculator::calculate_account_valuation;
use super::valuation_errors::ValuationError;
use super::valuation_model::AccountValuation;
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::Result as CoreResult;
use crate::quotes::{Quote, QuoteServiceTrait};
use crate::session::SessionContext;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Loads the caller's account and values it at live prices.
    async fn value_account(&self, session: &SessionContext) -> CoreResult<AccountValuation>;
}

pub struct ValuationService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl ValuationService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            quote_service,
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn value_account(&self, session: &SessionContext) -> CoreResult<AccountValuation> {
        let account = self
            .account_repository
            .get_by_user_id(&session.user_id)?
            .ok_or_else(|| ValuationError::AccountNotFound(session.user_id.clone()))?;

        let quotes = fetch_holding_quotes(self.quote_service.as_ref(), &account).await?;
        Ok(calculate_account_valuation(&account, &quotes)?)
    }
}

/// Fetches one quote per holding, one ticker at a time, stopping at the first
/// failure.
pub async fn fetch_holding_quotes(
    quote_service: &dyn QuoteServiceTrait,
    account: &Account,
) -> Result<HashMap<String, Quote>, ValuationError> {
    let mut quotes = HashMap::with_capacity(account.holdings.len());
    for ticker in account.holdings.keys() {
        match quote_service.get_latest_quote(ticker).await {
            Ok(quote) => {
                quotes.insert(ticker.clone(), quote);
            }
            Err(e) => {
                warn!(
                    "Quote fetch for {} failed while valuing account {}: {}",
                    ticker, account.user_id, e
                );
                return Err(ValuationError::QuoteUnavailable {
                    ticker: ticker.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    debug!(
        "Fetched {} quotes for account {}",
        quotes.len(),
        account.user_id
    );
    Ok(quotes)
}

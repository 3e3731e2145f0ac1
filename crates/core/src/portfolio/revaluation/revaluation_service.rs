use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use super::revaluation_gate::{revaluation_decision, RevaluationDecision};
use super::revaluation_model::{
    AccountRevaluationOutcome, RevaluationFailure, RevaluationReport,
};
use crate::accounts::{Account, AccountRepositoryTrait, ValuationHistoryUpdate};
use crate::errors::Result;
use crate::portfolio::trading::AccountLocks;
use crate::portfolio::valuation::{calculate_total_value, fetch_holding_quotes};
use crate::quotes::QuoteServiceTrait;

#[async_trait]
pub trait RevaluationServiceTrait: Send + Sync {
    /// Revalues every stored account. Only listing the accounts can fail;
    /// per-account failures are reported, never propagated.
    async fn revalue_all(&self, now: DateTime<Utc>) -> Result<RevaluationReport>;

    /// Revalues an explicit batch of accounts.
    async fn revalue_accounts(&self, accounts: Vec<Account>, now: DateTime<Utc>)
        -> RevaluationReport;
}

pub struct RevaluationService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    locks: AccountLocks,
    concurrency: usize,
}

impl RevaluationService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        locks: AccountLocks,
        concurrency: usize,
    ) -> Self {
        Self {
            account_repository,
            quote_service,
            locks,
            concurrency: concurrency.max(1),
        }
    }

    async fn revalue_account(&self, listed: Account, now: DateTime<Utc>) -> AccountRevaluationOutcome {
        match revaluation_decision(listed.last_revalued_at, now) {
            RevaluationDecision::MarketOpen => return AccountRevaluationOutcome::SkippedMarketOpen,
            RevaluationDecision::UpToDate => return AccountRevaluationOutcome::SkippedUpToDate,
            RevaluationDecision::Revalue => {}
        }

        let user_id = listed.user_id;
        let _guard = self.locks.lock(&user_id).await;

        // Re-read under the lock so a trade that landed since listing is counted.
        let account = match self.account_repository.get_by_user_id(&user_id) {
            Ok(Some(account)) => account,
            Ok(None) => return failure(&user_id, "account disappeared before revaluation"),
            Err(e) => return failure(&user_id, e),
        };
        if revaluation_decision(account.last_revalued_at, now) != RevaluationDecision::Revalue {
            return AccountRevaluationOutcome::SkippedUpToDate;
        }

        let quotes = match fetch_holding_quotes(self.quote_service.as_ref(), &account).await {
            Ok(quotes) => quotes,
            Err(e) => return failure(&user_id, e),
        };
        let total = match calculate_total_value(&account, &quotes) {
            Ok(total) => total,
            Err(e) => return failure(&user_id, e),
        };

        let mut valuation_history = account.valuation_history;
        valuation_history.push(total);
        let update = ValuationHistoryUpdate {
            valuation_history,
            last_revalued_at: now,
        };

        match self
            .account_repository
            .update_valuation_history(&user_id, update)
            .await
        {
            Ok(_) => {
                debug!("Recorded valuation {} for {}", total, user_id);
                AccountRevaluationOutcome::Revalued { user_id, total }
            }
            Err(e) => failure(&user_id, e),
        }
    }
}

#[async_trait]
impl RevaluationServiceTrait for RevaluationService {
    async fn revalue_all(&self, now: DateTime<Utc>) -> Result<RevaluationReport> {
        let accounts = self.account_repository.list_all()?;
        Ok(self.revalue_accounts(accounts, now).await)
    }

    async fn revalue_accounts(
        &self,
        accounts: Vec<Account>,
        now: DateTime<Utc>,
    ) -> RevaluationReport {
        let outcomes: Vec<AccountRevaluationOutcome> = stream::iter(accounts)
            .map(|account| self.revalue_account(account, now))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = RevaluationReport::empty(now);
        for outcome in outcomes {
            report.record(outcome);
        }

        info!(
            "Revaluation sweep at {}: {} revalued, {} skipped (market open), {} skipped (up to date), {} failed",
            now,
            report.revalued,
            report.skipped_market_open,
            report.skipped_up_to_date,
            report.failed.len()
        );
        report
    }
}

fn failure(user_id: &str, reason: impl ToString) -> AccountRevaluationOutcome {
    let reason = reason.to_string();
    warn!("Revaluation failed for {}: {}", user_id, reason);
    AccountRevaluationOutcome::Failed(RevaluationFailure {
        user_id: user_id.to_string(),
        reason,
    })
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One account that could not be revalued in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevaluationFailure {
    pub user_id: String,
    pub reason: String,
}

/// What happened to a single account during a sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountRevaluationOutcome {
    Revalued { user_id: String, total: Decimal },
    SkippedMarketOpen,
    SkippedUpToDate,
    Failed(RevaluationFailure),
}

/// Summary of a revaluation sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevaluationReport {
    pub evaluated_at: DateTime<Utc>,
    pub revalued: usize,
    pub skipped_market_open: usize,
    pub skipped_up_to_date: usize,
    pub failed: Vec<RevaluationFailure>,
}

impl RevaluationReport {
    pub fn empty(evaluated_at: DateTime<Utc>) -> Self {
        Self {
            evaluated_at,
            revalued: 0,
            skipped_market_open: 0,
            skipped_up_to_date: 0,
            failed: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: AccountRevaluationOutcome) {
        match outcome {
            AccountRevaluationOutcome::Revalued { .. } => self.revalued += 1,
            AccountRevaluationOutcome::SkippedMarketOpen => self.skipped_market_open += 1,
            AccountRevaluationOutcome::SkippedUpToDate => self.skipped_up_to_date += 1,
            AccountRevaluationOutcome::Failed(failure) => self.failed.push(failure),
        }
    }

    pub fn total(&self) -> usize {
        self.revalued + self.skipped_market_open + self.skipped_up_to_date + self.failed.len()
    }
}

//! Daily revaluation: appends one valuation snapshot per account per trading
//! day, run only while the market is closed.

mod revaluation_gate;
mod revaluation_model;
mod revaluation_service;


pub use revaluation_gate::{revaluation_decision, RevaluationDecision};
pub use revaluation_model::{AccountRevaluationOutcome, RevaluationFailure, RevaluationReport};
pub use revaluation_service::{RevaluationService, RevaluationServiceTrait};

//! Quote lookup module.
//!
//! ```text
//! Trade / Valuation / Revaluation ──▶ QuoteService ──▶ MarketDataProvider
//!                                       (normalize, timeout, validate)
//! ```
//!
//! Quotes are fetched fresh for every operation and never stored.

mod quotes_service;
#[cfg(test)]
mod quotes_service_tests;

pub use papertrade_market_data::{normalize_symbol, Quote};
pub use quotes_service::{QuoteService, QuoteServiceTrait};

//! Papertrade Market Data Crate
//!
//! This crate provides provider-agnostic latest-quote fetching for the
//! papertrade engine. The engine only ever needs the current price and the
//! display name of a ticker, fetched fresh for every operation.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +--------------------+     +------------------+
//! |   Core services  | --> | MarketDataProvider | --> |     Quote        |
//! +------------------+     +--------------------+     +------------------+
//!                                   |
//!                                   v
//!                          Yahoo Finance (HTTP)
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Latest price and display name for a ticker
//! - [`MarketDataProvider`] - Trait implemented by every price source
//! - [`MarketDataError`] - Errors with a [`RetryClass`] classification

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{normalize_symbol, Quote};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;

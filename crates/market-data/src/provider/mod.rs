//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - The Yahoo Finance provider used in production

mod traits;

pub mod yahoo;

pub use traits::MarketDataProvider;

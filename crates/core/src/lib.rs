//! Papertrade Core - Domain entities, services, and traits.
//!
//! This crate contains the trade-and-valuation engine: trade execution,
//! portfolio valuation, daily account revaluation and the leaderboard.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod session;
pub mod settings;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export common types from the portfolio module
pub use portfolio::*;
pub use session::SessionContext;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

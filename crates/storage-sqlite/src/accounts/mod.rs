//! SQLite storage implementation for accounts.

mod model;
mod repository;

pub use model::{AccountDB, AccountHoldingsChangeset, ValuationHistoryChangeset};
pub use repository::AccountRepository;

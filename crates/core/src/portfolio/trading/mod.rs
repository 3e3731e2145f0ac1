//! Trade execution: the pure buy/sell state transition, its service wrapper,
//! and the per-account lock registry shared with revaluation.

mod account_locks;
mod trade_calculator;
mod trade_errors;
mod trade_model;
mod trade_service;


pub use account_locks::AccountLocks;
pub use trade_calculator::{apply_trade, trade_value};
pub use trade_errors::TradeError;
pub use trade_model::{TradeReceipt, TradeRequest, TradeSide};
pub use trade_service::{TradeService, TradeServiceTrait};

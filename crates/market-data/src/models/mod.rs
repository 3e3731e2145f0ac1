//! Market data models
//!
//! - `quote` - Latest quote for a ticker (Quote) and symbol normalization

mod quote;

pub use quote::{normalize_symbol, Quote};

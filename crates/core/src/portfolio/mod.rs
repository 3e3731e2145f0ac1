//! Portfolio engine: valuation, trade execution, daily revaluation and the
//! leaderboard built from recorded valuations.

pub mod leaderboard;
pub mod revaluation;
pub mod trading;
pub mod valuation;

pub use leaderboard::*;
pub use revaluation::*;
pub use trading::*;
pub use valuation::*;

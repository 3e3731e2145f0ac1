mod leaderboard_model;
mod leaderboard_service;

pub use leaderboard_model::LeaderboardEntry;
pub use leaderboard_service::{build_leaderboard, LeaderboardService, LeaderboardServiceTrait};

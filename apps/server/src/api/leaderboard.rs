use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use papertrade_core::portfolio::leaderboard::LeaderboardEntry;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.leaderboard_service.get_leaderboard()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}

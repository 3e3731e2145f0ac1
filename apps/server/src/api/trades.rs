use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use papertrade_core::{
    portfolio::trading::{TradeReceipt, TradeRequest},
    SessionContext,
};

use crate::{error::ApiResult, main_lib::AppState};

/// Buys (`amount > 0`) or sells (`amount < 0`) whole shares at the live price.
async fn execute_trade(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<TradeRequest>,
) -> ApiResult<(StatusCode, Json<TradeReceipt>)> {
    let receipt = state
        .trade_service
        .execute_trade(&session, &request.ticker, request.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/trades", post(execute_trade))
}

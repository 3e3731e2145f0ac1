use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use papertrade_core::quotes::Quote;

use crate::{error::ApiResult, main_lib::AppState};

/// Live price lookup, used by clients before placing a trade.
async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Quote>> {
    Ok(Json(state.quote_service.get_latest_quote(&symbol).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quotes/{symbol}", get(get_quote))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use papertrade_core::{
    accounts::Account, portfolio::valuation::AccountValuation, SessionContext,
};

use crate::{error::ApiResult, main_lib::AppState};

/// The caller's stored account: cash, holdings and valuation history.
async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<Account>> {
    Ok(Json(state.account_service.get_account(&session)?))
}

/// The caller's account valued at live prices.
async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Json<AccountValuation>> {
    Ok(Json(state.valuation_service.value_account(&session).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/account", get(get_account))
        .route("/portfolio", get(get_portfolio))
}

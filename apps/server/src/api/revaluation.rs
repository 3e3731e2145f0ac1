use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use papertrade_core::portfolio::revaluation::RevaluationReport;

use crate::{error::ApiResult, main_lib::AppState};

/// Runs one revaluation sweep now. Accounts that are not due are skipped, so
/// calling this repeatedly is harmless.
async fn run_revaluation(State(state): State<Arc<AppState>>) -> ApiResult<Json<RevaluationReport>> {
    let report = state.revaluation_service.revalue_all(Utc::now()).await?;
    tracing::info!(
        "On-demand revaluation: {} revalued, {} failed",
        report.revalued,
        report.failed.len()
    );
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/revaluations/run", post(run_revaluation))
}

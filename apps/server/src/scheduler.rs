//! Background scheduler for the daily revaluation sweep.
//!
//! The sweep runs on a fixed interval. Each run only touches accounts that are
//! due (market closed and not yet revalued for the current trading day), so a
//! short interval just means the day's snapshot is taken soon after the close.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first sweep, to let the server finish starting.
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the background revaluation scheduler.
pub fn start_revaluation_scheduler(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Revaluation scheduler started ({}s interval)", every.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut ticker = interval(every.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_scheduled_revaluation(&state).await;
        }
    })
}

/// Runs a single scheduled sweep.
async fn run_scheduled_revaluation(state: &Arc<AppState>) {
    match state.revaluation_service.revalue_all(Utc::now()).await {
        Ok(report) if report.revalued == 0 && report.failed.is_empty() => {
            debug!(
                "Scheduled revaluation: nothing due ({} market open, {} up to date)",
                report.skipped_market_open, report.skipped_up_to_date
            );
        }
        Ok(report) => {
            info!(
                "Scheduled revaluation completed: {} revalued, {} failed of {} accounts",
                report.revalued,
                report.failed.len(),
                report.total()
            );
        }
        Err(e) => warn!("Scheduled revaluation failed: {}", e),
    }
}

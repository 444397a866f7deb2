use std::time::Duration;

use chrono::Local;
use tracing::{error, info};

use super::AppState;
use crate::daily::until_next_day;

/// Slack added after midnight so the run lands inside the new day.
const MIDNIGHT_SLACK: Duration = Duration::from_secs(1);

/// Runs the daily job at every local midnight until the process exits.
pub(crate) fn spawn_daily_schedule(state: AppState) {
    tokio::spawn(async move {
        loop {
            let wait = until_next_day(&Local::now()) + MIDNIGHT_SLACK;
            info!("Next scheduled generation in {}s", wait.as_secs());
            tokio::time::sleep(wait).await;

            match state.run_daily().await {
                Ok(outcome) => info!(
                    "Scheduled generation: {} (art {})",
                    outcome.message(),
                    outcome.art().id
                ),
                Err(err) => error!("Scheduled generation failed: {}", err),
            }
        }
    });
}

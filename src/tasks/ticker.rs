//! Countdown tick background task

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that ticks the engine while the countdown is running.
///
/// The interval is dropped as soon as the published view reports the timer
/// stopped (pause, reset, expiry), so no stale tick survives a state change.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task ({}ms cadence)", state.timing.tick_period.as_millis());

    let mut view_rx = state.subscribe_view();

    loop {
        // Wait until a countdown is running
        if !view_rx.borrow_and_update().is_running {
            if view_rx.changed().await.is_err() {
                debug!("View channel closed, stopping ticker");
                return;
            }
            continue;
        }

        debug!("Countdown running, starting ticks");
        let mut ticks = interval(state.timing.tick_period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if let Err(e) = state.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                changed = view_rx.changed() => {
                    if changed.is_err() {
                        debug!("View channel closed, stopping ticker");
                        return;
                    }
                    if !view_rx.borrow_and_update().is_running {
                        debug!("Countdown stopped, cancelling ticks");
                        break;
                    }
                }
            }
        }
    }
}

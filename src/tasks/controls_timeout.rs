//! Controls overlay auto-hide background task

use std::sync::Arc;
use tokio::{sync::broadcast::error::RecvError, time::sleep};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that hides the controls after a period without interaction.
/// Every interaction restarts the delay.
pub async fn controls_timeout_task(state: Arc<AppState>) {
    info!("Starting controls timeout task ({}s delay)", state.timing.controls_timeout.as_secs_f32());

    let mut interactions = state.subscribe_interactions();

    loop {
        if state.controls_visible() {
            tokio::select! {
                _ = sleep(state.timing.controls_timeout) => {
                    debug!("No interaction, hiding controls");
                    if let Err(e) = state.hide_controls() {
                        warn!("Failed to hide controls: {}", e);
                    }
                }

                received = interactions.recv() => {
                    if matches!(received, Err(RecvError::Closed)) {
                        return;
                    }
                    // Loop around and restart the delay
                }
            }
        } else {
            match interactions.recv().await {
                Ok(()) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return,
            }
        }
    }
}

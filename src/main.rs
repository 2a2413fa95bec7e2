//! Flashtimer - A full-screen countdown timer that flashes as time runs low
//!
//! This is the main entry point for the flashtimer application.

use std::{
    fs,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use tracing::info;

use flashtimer::{
    config::Config,
    engine::SystemClock,
    state::AppState,
    storage::JsonFileStorage,
    tasks::{controls_timeout_task, ticker_task},
    ui::run_terminal,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to a file so they don't draw over the full-screen display
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("flashtimer={}", config.log_level()))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("Starting flashtimer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: state_file={}, tick={}ms, controls_timeout={}s",
        config.state_path().display(),
        config.tick_ms,
        config.controls_timeout_secs
    );

    // Load the persisted timer and rehydrate it
    let storage = Arc::new(JsonFileStorage::new(config.state_path()));
    let state = Arc::new(AppState::load(storage, Arc::new(SystemClock), config.timing()));

    if let Some(minutes) = config.duration {
        state.select_duration(minutes)?;
    }

    // Start the background tasks
    tokio::spawn(ticker_task(Arc::clone(&state)));
    tokio::spawn(controls_timeout_task(Arc::clone(&state)));

    tokio::select! {
        result = run_terminal(Arc::clone(&state)) => {
            if let Err(e) = result {
                tracing::error!("Terminal error: {}", e);
                return Err(e);
            }
        }
        signal = shutdown_signal() => {
            info!("Shutdown signal received: {:?}", signal);
        }
    }

    info!("Flashtimer shutdown complete");
    Ok(())
}

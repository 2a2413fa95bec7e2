//! Flashtimer - A full-screen countdown timer that flashes as time runs low
//!
//! This library provides the countdown state machine, its wall-clock
//! reconciliation, key-value persistence of the timer record, and the
//! background tasks and terminal front-end that drive it.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::TimerEngine;
pub use error::{AppError, EngineError, StorageError};
pub use state::{AppState, TimerStore, ViewState};
pub use utils::signals::shutdown_signal;

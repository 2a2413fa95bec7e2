//! State management module
//!
//! This module contains the durable timer record, the derived view state and
//! the shared application state that ties them to storage.

pub mod app_state;
pub mod timer_store;
pub mod view_state;

// Re-export main types
pub use app_state::{AppState, TimingSettings};
pub use timer_store::{TimerMode, TimerStore};
pub use view_state::{Band, BlinkPhase, Color, ColorPair, ViewState};

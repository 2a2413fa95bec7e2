//! Background tasks module
//!
//! This module contains the timers that run alongside the terminal front-end.

pub mod controls_timeout;
pub mod ticker;

// Re-export main functions
pub use controls_timeout::controls_timeout_task;
pub use ticker::ticker_task;

//! Timer engine module
//!
//! The countdown is a wall-clock state machine: remaining time is always
//! recomputed from an absolute target instant, so ticks missed while the
//! process was suspended correct themselves on the next tick.
//!
//! ```text
//! Idle -> Running <-> Paused
//!         Running -> Expired (at zero)
//! Paused/Expired at zero -> Running (restart with the same duration)
//! any -> Idle (reset)
//! ```

pub mod clock;
pub mod reducer;
pub mod thresholds;
pub mod timer_engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use reducer::{derive, parse_minutes, reduce, remaining_seconds, time_left, Intent};
pub use thresholds::{rounded_threshold, Thresholds};
pub use timer_engine::TimerEngine;

/// Durations offered on the selection screen, in minutes
pub const SELECTABLE_DURATIONS: [u32; 9] = [1, 3, 5, 10, 15, 20, 30, 45, 60];

//! Durable timer record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only durable entity: everything needed to rebuild the countdown after a restart.
///
/// Field names and the millisecond timestamp match the persisted JSON layout
/// (`targetTime`, `isRunning`, `pausedTime`, `duration`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStore {
    /// Instant at which the running countdown reaches zero
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub target_time: Option<DateTime<Utc>>,
    /// Whether the countdown is currently advancing
    #[serde(default)]
    pub is_running: bool,
    /// Remaining seconds frozen at the moment of pause
    #[serde(default)]
    pub paused_time: Option<u64>,
    /// Originally selected duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
}

/// Which of the mutually exclusive timer modes a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Idle,
    Running,
    Paused,
    Expired,
}

impl TimerStore {
    /// Create an idle record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target_time(&mut self, target_time: Option<DateTime<Utc>>) {
        self.target_time = target_time;
    }

    pub fn set_is_running(&mut self, is_running: bool) {
        self.is_running = is_running;
    }

    pub fn set_paused_time(&mut self, paused_time: Option<u64>) {
        self.paused_time = paused_time;
    }

    pub fn set_duration(&mut self, duration: Option<u32>) {
        self.duration = duration;
    }

    /// Clear every field back to the idle state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Classify the record. A paused snapshot wins over a stale target.
    pub fn mode(&self) -> TimerMode {
        if self.target_time.is_none() {
            TimerMode::Idle
        } else if self.is_running {
            TimerMode::Running
        } else if self.paused_time.is_some() {
            TimerMode::Paused
        } else {
            TimerMode::Expired
        }
    }

    pub fn is_idle(&self) -> bool {
        self.mode() == TimerMode::Idle
    }
}

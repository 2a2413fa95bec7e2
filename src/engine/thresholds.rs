//! Duration-relative warning and final thresholds

use crate::state::{Band, TimerStore};

/// Share of the duration left when the warning colours kick in
pub const WARNING_FRACTION: f64 = 0.20;
/// Share of the duration left when the display starts flashing
pub const FINAL_FRACTION: f64 = 0.10;

/// Fixed thresholds for records persisted without a duration
pub const LEGACY_WARNING_THRESHOLD: u64 = 60;
pub const LEGACY_FINAL_THRESHOLD: u64 = 30;

/// Round `total_seconds * fraction` to a step that suits the timer's length:
/// 5 s up to a minute, 10 s up to five, 30 s up to ten, whole minutes beyond.
pub fn rounded_threshold(total_seconds: u64, fraction: f64) -> u64 {
    let raw = total_seconds as f64 * fraction;
    let increment: u64 = if total_seconds <= 60 {
        5
    } else if total_seconds <= 300 {
        10
    } else if total_seconds <= 600 {
        30
    } else {
        60
    };

    (raw / increment as f64).round() as u64 * increment
}

/// Remaining-seconds cutoffs for the warning and final bands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: u64,
    pub final_: u64,
}

impl Thresholds {
    pub fn for_duration(minutes: u32) -> Self {
        let total = u64::from(minutes) * 60;
        Self {
            warning: rounded_threshold(total, WARNING_FRACTION),
            final_: rounded_threshold(total, FINAL_FRACTION),
        }
    }

    pub fn legacy() -> Self {
        Self {
            warning: LEGACY_WARNING_THRESHOLD,
            final_: LEGACY_FINAL_THRESHOLD,
        }
    }

    /// Thresholds implied by a persisted record
    pub fn for_store(store: &TimerStore) -> Self {
        match (store.duration, store.target_time) {
            (Some(minutes), _) => Self::for_duration(minutes),
            (None, Some(_)) => Self::legacy(),
            (None, None) => Self::default(),
        }
    }

    pub fn band(&self, time_left: u64) -> Band {
        if time_left <= self.final_ {
            Band::Final
        } else if time_left <= self.warning {
            Band::Warning
        } else {
            Band::Normal
        }
    }
}

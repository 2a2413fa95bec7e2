//! Pure state transitions and view derivation
//!
//! `reduce` maps a record plus an intent to the next record, and `derive`
//! turns a record plus the current instant into a [`ViewState`]. Neither
//! function reads a clock or touches storage.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::EngineError,
    state::{Band, BlinkPhase, ColorPair, TimerMode, TimerStore, ViewState},
};
use super::Thresholds;

/// User and timer intents understood by the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectDuration(u32),
    TogglePause,
    Reset,
    Tick,
}

/// Parse a user-supplied duration, rejecting anything but a positive whole number of minutes
pub fn parse_minutes(input: &str) -> Result<u32, EngineError> {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(EngineError::InvalidDuration(input.trim().to_string())),
    }
}

/// Whole seconds until `target`, rounded half-up and clamped at zero
pub fn remaining_seconds(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let diff_ms = (target - now).num_milliseconds();
    (diff_ms + 500).div_euclid(1000).max(0) as u64
}

/// Seconds left on the record at `now`, `None` when idle
pub fn time_left(store: &TimerStore, now: DateTime<Utc>) -> Option<u64> {
    match store.paused_time {
        Some(paused) => Some(paused),
        None => store.target_time.map(|target| remaining_seconds(target, now)),
    }
}

/// Apply an intent to a record. Invalid input leaves the record untouched.
pub fn reduce(store: &TimerStore, intent: Intent, now: DateTime<Utc>) -> Result<TimerStore, EngineError> {
    let mut next = store.clone();

    match intent {
        Intent::SelectDuration(minutes) => start(&mut next, minutes, now)?,
        Intent::TogglePause => match store.mode() {
            TimerMode::Running => {
                let mut left = time_left(store, now).unwrap_or(0);
                if let Some(minutes) = store.duration {
                    left = left.min(u64::from(minutes) * 60);
                }
                next.set_is_running(false);
                next.set_paused_time(Some(left));
            }
            TimerMode::Paused | TimerMode::Expired => {
                let left = time_left(store, now).unwrap_or(0);
                if left > 0 {
                    next.set_target_time(Some(seconds_from(now, left)?));
                    next.set_is_running(true);
                    next.set_paused_time(None);
                } else if let Some(minutes) = store.duration {
                    start(&mut next, minutes, now)?;
                }
            }
            TimerMode::Idle => {}
        },
        Intent::Reset => next.reset(),
        Intent::Tick => {
            if store.mode() == TimerMode::Running && time_left(store, now) == Some(0) {
                next.set_is_running(false);
            }
        }
    }

    Ok(next)
}

fn start(store: &mut TimerStore, minutes: u32, now: DateTime<Utc>) -> Result<(), EngineError> {
    if minutes == 0 {
        return Err(EngineError::InvalidDuration(minutes.to_string()));
    }

    let target = seconds_from(now, u64::from(minutes) * 60)?;
    store.set_duration(Some(minutes));
    store.set_target_time(Some(target));
    store.set_is_running(true);
    store.set_paused_time(None);
    Ok(())
}

fn seconds_from(now: DateTime<Utc>, seconds: u64) -> Result<DateTime<Utc>, EngineError> {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or(EngineError::TimeOverflow(seconds))
}

/// Build the frame the presentation layer draws for `store` at `now`
pub fn derive(
    store: &TimerStore,
    now: DateTime<Utc>,
    thresholds: Thresholds,
    phase: BlinkPhase,
    show_controls: bool,
) -> ViewState {
    let time_left = time_left(store, now);
    let band = time_left.map_or(Band::Normal, |left| thresholds.band(left));

    ViewState {
        time_left,
        is_running: store.is_running,
        mode: store.mode(),
        colors: ColorPair::for_band(band, phase),
        warning_threshold: thresholds.warning,
        final_threshold: thresholds.final_,
        is_warning: band != Band::Normal,
        is_final: band == Band::Final,
        show_controls,
    }
}

//! Timer engine: intent handlers and wall-clock reconciliation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    error::EngineError,
    state::{Band, BlinkPhase, TimerMode, TimerStore, ViewState},
};
use super::{
    reducer::{derive, reduce, time_left, Intent},
    Clock, Thresholds,
};

/// Owns the durable record plus the ephemeral display state derived from it
#[derive(Debug)]
pub struct TimerEngine {
    store: TimerStore,
    clock: Arc<dyn Clock>,
    thresholds: Thresholds,
    phase: BlinkPhase,
    show_controls: bool,
}

impl TimerEngine {
    /// Create an idle engine
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_store(TimerStore::new(), clock)
    }

    /// Create an engine around a previously persisted record.
    /// Call [`TimerEngine::rehydrate`] before using it.
    pub fn with_store(store: TimerStore, clock: Arc<dyn Clock>) -> Self {
        let thresholds = Thresholds::for_store(&store);
        Self {
            store,
            clock,
            thresholds,
            phase: BlinkPhase::Off,
            show_controls: true,
        }
    }

    pub fn store(&self) -> &TimerStore {
        &self.store
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn mode(&self) -> TimerMode {
        self.store.mode()
    }

    /// Seconds remaining right now, `None` when idle
    pub fn time_left(&self) -> Option<u64> {
        time_left(&self.store, self.clock.now())
    }

    /// Start a fresh countdown of `minutes`
    pub fn select_duration(&mut self, minutes: u32) -> Result<(), EngineError> {
        self.store = reduce(&self.store, Intent::SelectDuration(minutes), self.clock.now())?;
        self.thresholds = Thresholds::for_duration(minutes);
        self.phase = BlinkPhase::Off;
        self.show_controls = true;

        info!(
            "Timer started for {} min (warning at {}s, final at {}s)",
            minutes, self.thresholds.warning, self.thresholds.final_
        );
        Ok(())
    }

    /// Pause a running countdown, resume a paused one, or restart one that ran out.
    /// A record that can't be resumed is reset to idle.
    pub fn toggle_pause(&mut self) {
        let before = self.store.mode();
        let now = self.clock.now();
        let left = time_left(&self.store, now);

        match reduce(&self.store, Intent::TogglePause, now) {
            Ok(next) => self.store = next,
            Err(e) => {
                warn!("Cannot resume timer, resetting: {}", e);
                self.reset();
                return;
            }
        }
        self.show_controls = true;

        match (before, self.store.mode()) {
            (TimerMode::Running, TimerMode::Paused) => {
                info!("Timer paused with {}s left", self.store.paused_time.unwrap_or(0));
            }
            (TimerMode::Paused | TimerMode::Expired, TimerMode::Running) if left == Some(0) => {
                self.thresholds = Thresholds::for_store(&self.store);
                self.phase = BlinkPhase::Off;
                info!("Timer restarted for {} min", self.store.duration.unwrap_or(0));
            }
            (_, TimerMode::Running) => info!("Timer resumed with {}s left", left.unwrap_or(0)),
            (mode, _) => debug!("Toggle ignored in {:?} mode", mode),
        }
    }

    /// Clear the countdown back to the selection screen
    pub fn reset(&mut self) {
        self.store.reset();
        self.thresholds = Thresholds::default();
        self.phase = BlinkPhase::Off;
        self.show_controls = true;
        info!("Timer reset");
    }

    /// Reconcile against the wall clock and advance the blink phase.
    /// Does nothing unless the countdown is running.
    pub fn tick(&mut self) -> ViewState {
        if self.store.mode() != TimerMode::Running {
            debug!("Ignoring tick while {:?}", self.store.mode());
            return self.view();
        }

        let now = self.clock.now();
        match reduce(&self.store, Intent::Tick, now) {
            Ok(next) => self.store = next,
            Err(e) => warn!("Tick failed: {}", e),
        }

        let left = time_left(&self.store, now).unwrap_or(0);
        self.phase = match self.thresholds.band(left) {
            Band::Final => self.phase.toggled(),
            Band::Warning | Band::Normal => BlinkPhase::Off,
        };

        if self.store.mode() == TimerMode::Expired {
            info!("Timer expired");
        }

        derive(&self.store, now, self.thresholds, self.phase, self.show_controls)
    }

    /// Rebuild display state from a freshly loaded record.
    /// A countdown that ran out while the process was away is reset.
    pub fn rehydrate(&mut self) -> ViewState {
        let now = self.clock.now();
        self.thresholds = Thresholds::for_store(&self.store);
        self.phase = BlinkPhase::Off;

        if !record_in_range(&self.store) {
            warn!("Persisted timer is out of range, resetting: {:?}", self.store);
            self.reset();
        } else if let Some(paused) = self.store.paused_time {
            info!("Rehydrated paused timer with {}s left", paused);
        } else if let Some(target) = self.store.target_time {
            match time_left(&self.store, now) {
                Some(left) if left > 0 => info!("Rehydrated timer with {}s left", left),
                _ => {
                    info!("Persisted timer expired at {}, resetting", target);
                    self.reset();
                }
            }
        } else {
            debug!("Rehydrated idle timer");
        }

        derive(&self.store, now, self.thresholds, self.phase, self.show_controls)
    }

    /// Show the controls overlay
    pub fn register_interaction(&mut self) {
        self.show_controls = true;
    }

    /// Hide the controls overlay
    pub fn hide_controls(&mut self) {
        self.show_controls = false;
    }

    pub fn controls_visible(&self) -> bool {
        self.show_controls
    }

    /// Current frame, computed without advancing the blink phase
    pub fn view(&self) -> ViewState {
        derive(&self.store, self.clock.now(), self.thresholds, self.phase, self.show_controls)
    }
}

/// A paused snapshot can't exceed the selected duration, and a duration is never zero
fn record_in_range(store: &TimerStore) -> bool {
    let limit = match store.duration {
        Some(0) => return false,
        Some(minutes) => u64::from(minutes) * 60,
        None => u64::from(u32::MAX) * 60,
    };
    store.paused_time.map_or(true, |paused| paused <= limit)
}

//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    engine::{Clock, TimerEngine},
    error::{AppError, EngineError},
    storage::{load_timer_store, save_timer_store, KeyValueStorage},
};
use super::{TimerStore, ViewState};

/// Cadences for the background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    /// Period of the countdown tick while running
    pub tick_period: Duration,
    /// Inactivity delay before the controls overlay hides
    pub controls_timeout: Duration,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(250),
            controls_timeout: Duration::from_secs(3),
        }
    }
}

/// Shared handle to the timer engine, its storage and the change channels
#[derive(Debug)]
pub struct AppState {
    /// The single writer of the timer record
    engine: Mutex<TimerEngine>,
    storage: Arc<dyn KeyValueStorage>,
    pub timing: TimingSettings,
    /// Latest derived frame for the renderer and the ticker
    view_tx: watch::Sender<ViewState>,
    /// Keep the receiver alive to prevent channel closure
    _view_rx: watch::Receiver<ViewState>,
    /// Fired whenever the controls overlay is (re)shown
    interaction_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Wrap an engine without touching storage
    pub fn new(engine: TimerEngine, storage: Arc<dyn KeyValueStorage>, timing: TimingSettings) -> Self {
        let (view_tx, view_rx) = watch::channel(engine.view());
        let (interaction_tx, _) = broadcast::channel(16);

        Self {
            engine: Mutex::new(engine),
            storage,
            timing,
            view_tx,
            _view_rx: view_rx,
            interaction_tx,
        }
    }

    /// Load the persisted record and rehydrate it.
    /// Unreadable storage falls back to the idle state.
    pub fn load(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>, timing: TimingSettings) -> Self {
        let persisted = match load_timer_store(storage.as_ref()) {
            Ok(Some(store)) => store,
            Ok(None) => {
                info!("No persisted timer found, starting idle");
                TimerStore::new()
            }
            Err(e) => {
                warn!("Failed to read persisted timer, starting idle: {}", e);
                TimerStore::new()
            }
        };

        let mut engine = TimerEngine::with_store(persisted.clone(), clock);
        engine.rehydrate();
        let rehydrated = engine.store().clone();

        let state = Self::new(engine, storage, timing);
        if rehydrated != persisted {
            state.persist(&rehydrated);
        }
        state
    }

    /// Apply a change to the engine, persist the record if it moved, and publish the new frame
    fn update<F>(&self, action: &str, notify_interaction: bool, updater: F) -> Result<ViewState, AppError>
    where
        F: FnOnce(&mut TimerEngine) -> Result<ViewState, EngineError>,
    {
        let mut engine = self.engine.lock()
            .map_err(|_| AppError::LockPoisoned("timer engine"))?;

        let before = engine.store().clone();
        let view = updater(&mut *engine)?;
        let after = engine.store().clone();
        drop(engine); // Release the lock early

        if before != after {
            debug!("Timer record changed by {}: {:?}", action, after);
            self.persist(&after);
        }

        self.view_tx.send_replace(view.clone());

        if notify_interaction {
            // No receivers just means the controls task isn't running
            let _ = self.interaction_tx.send(());
        }

        Ok(view)
    }

    /// Write-through; a failed write leaves the in-memory record authoritative
    fn persist(&self, store: &TimerStore) {
        if let Err(e) = save_timer_store(self.storage.as_ref(), store) {
            warn!("Failed to persist timer state: {}", e);
        }
    }

    /// Start a countdown of `minutes`
    pub fn select_duration(&self, minutes: u32) -> Result<ViewState, AppError> {
        self.update("select-duration", true, |engine| {
            engine.select_duration(minutes)?;
            Ok(engine.view())
        })
    }

    /// Pause, resume or restart the countdown
    pub fn toggle_pause(&self) -> Result<ViewState, AppError> {
        self.update("toggle-pause", true, |engine| {
            engine.toggle_pause();
            Ok(engine.view())
        })
    }

    /// Return to the selection screen
    pub fn reset(&self) -> Result<ViewState, AppError> {
        self.update("reset", true, |engine| {
            engine.reset();
            Ok(engine.view())
        })
    }

    /// Reconcile against the wall clock
    pub fn tick(&self) -> Result<ViewState, AppError> {
        self.update("tick", false, |engine| Ok(engine.tick()))
    }

    /// Show the controls and restart their hide delay
    pub fn register_interaction(&self) -> Result<ViewState, AppError> {
        self.update("interaction", true, |engine| {
            engine.register_interaction();
            Ok(engine.view())
        })
    }

    /// Hide the controls overlay (called by the controls timeout task)
    pub fn hide_controls(&self) -> Result<ViewState, AppError> {
        self.update("hide-controls", false, |engine| {
            engine.hide_controls();
            Ok(engine.view())
        })
    }

    /// Latest published frame
    pub fn view(&self) -> ViewState {
        self.view_tx.borrow().clone()
    }

    /// Copy of the durable record
    pub fn timer_store(&self) -> Result<TimerStore, AppError> {
        self.engine.lock()
            .map(|engine| engine.store().clone())
            .map_err(|_| AppError::LockPoisoned("timer engine"))
    }

    pub fn controls_visible(&self) -> bool {
        self.view_tx.borrow().show_controls
    }

    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.view_tx.subscribe()
    }

    pub fn subscribe_interactions(&self) -> broadcast::Receiver<()> {
        self.interaction_tx.subscribe()
    }
}

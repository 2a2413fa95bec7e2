//! End-to-end timer behaviour across intents, ticks and restarts

use std::sync::Arc;

use chrono::Duration;
use flashtimer::{
    engine::{Clock, ManualClock},
    state::{AppState, TimerMode, TimerStore, TimingSettings},
    storage::{load_timer_store, save_timer_store, JsonFileStorage, KeyValueStorage, TIMER_STORAGE_KEY},
};

fn open(path: &std::path::Path, clock: &ManualClock) -> AppState {
    AppState::load(
        Arc::new(JsonFileStorage::new(path)),
        Arc::new(clock.clone()),
        TimingSettings::default(),
    )
}

#[test]
fn test_running_timer_survives_restart_without_drift() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let clock = ManualClock::default();

    let state = open(&path, &clock);
    state.select_duration(10).unwrap();
    clock.advance_secs(100);
    state.tick().unwrap();
    drop(state);

    // Process was away for five minutes
    clock.advance_secs(300);
    let state = open(&path, &clock);
    let view = state.view();
    assert_eq!(view.mode, TimerMode::Running);
    assert_eq!(view.time_left, Some(200));
    assert_eq!(view.warning_threshold, 120);
    assert_eq!(view.final_threshold, 60);
}

#[test]
fn test_paused_timer_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let clock = ManualClock::default();

    let state = open(&path, &clock);
    state.select_duration(10).unwrap();
    clock.advance_secs(30);
    state.toggle_pause().unwrap();
    drop(state);

    clock.advance_secs(3600);
    let state = open(&path, &clock);
    assert_eq!(state.view().time_left, Some(570));

    clock.advance_secs(5);
    let view = state.toggle_pause().unwrap();
    assert_eq!(view.mode, TimerMode::Running);
    assert_eq!(view.time_left, Some(570));
}

#[test]
fn test_expired_while_away_rehydrates_idle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let clock = ManualClock::default();

    let storage = JsonFileStorage::new(&path);
    let stale = TimerStore {
        target_time: Some(clock.now() - Duration::seconds(10)),
        is_running: true,
        paused_time: None,
        duration: Some(1),
    };
    save_timer_store(&storage, &stale).unwrap();

    let state = open(&path, &clock);
    let view = state.view();
    assert_eq!(view.mode, TimerMode::Idle);
    assert_eq!(view.time_left, None);

    // The reset is written back so the next launch starts idle too
    assert_eq!(load_timer_store(&storage).unwrap(), Some(TimerStore::new()));
}

#[test]
fn test_corrupt_state_file_falls_back_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "garbage").unwrap();

    let clock = ManualClock::default();
    let state = open(&path, &clock);
    assert_eq!(state.view().mode, TimerMode::Idle);
    assert!(state.select_duration(1).is_ok());
}

#[test]
fn test_corrupt_state_file_is_repaired_by_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "garbage").unwrap();

    let clock = ManualClock::default();
    let state = open(&path, &clock);
    state.select_duration(10).unwrap();
    drop(state);

    clock.advance_secs(60);
    let state = open(&path, &clock);
    let view = state.view();
    assert_eq!(view.mode, TimerMode::Running);
    assert_eq!(view.time_left, Some(540));
}

#[test]
fn test_malformed_record_falls_back_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    JsonFileStorage::new(&path)
        .set_item(TIMER_STORAGE_KEY, r#"{"state":{"isRunning":"yes"},"version":0}"#)
        .unwrap();

    let state = open(&path, &ManualClock::default());
    assert_eq!(state.view().mode, TimerMode::Idle);
}

#[test]
fn test_out_of_range_paused_record_resets_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    JsonFileStorage::new(&path)
        .set_item(
            TIMER_STORAGE_KEY,
            r#"{"state":{"targetTime":1700000000000,"isRunning":false,"pausedTime":9000000000000000,"duration":1},"version":0}"#,
        )
        .unwrap();

    let state = open(&path, &ManualClock::default());
    assert_eq!(state.view().mode, TimerMode::Idle);
    assert!(state.timer_store().unwrap().is_idle());

    let view = state.toggle_pause().unwrap();
    assert_eq!(view.mode, TimerMode::Idle);

    let storage = JsonFileStorage::new(&path);
    assert!(load_timer_store(&storage).unwrap().unwrap().is_idle());
}

#[test]
fn test_expiry_then_reset() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::default();
    let state = open(&dir.path().join("state.json"), &clock);

    state.select_duration(1).unwrap();
    clock.advance_secs(61);
    let view = state.tick().unwrap();
    assert_eq!(view.time_left, Some(0));
    assert!(!view.is_running);
    assert_eq!(view.mode, TimerMode::Expired);

    let view = state.reset().unwrap();
    assert_eq!(view.mode, TimerMode::Idle);
    assert_eq!(state.timer_store().unwrap(), TimerStore::new());
}

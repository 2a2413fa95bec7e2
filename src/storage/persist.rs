//! Timer record persistence under a single storage key

use serde::{Deserialize, Serialize};

use crate::{error::StorageError, state::TimerStore};
use super::KeyValueStorage;

/// Storage key holding the timer record
pub const TIMER_STORAGE_KEY: &str = "timer-storage";

/// Version written into the envelope; anything else is rejected on load
pub const STATE_VERSION: u32 = 0;

/// Versioned envelope around the persisted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub state: TimerStore,
    pub version: u32,
}

/// Read the persisted record, `None` on first launch
pub fn load_timer_store(storage: &dyn KeyValueStorage) -> Result<Option<TimerStore>, StorageError> {
    let Some(raw) = storage.get_item(TIMER_STORAGE_KEY)? else {
        return Ok(None);
    };

    let envelope: PersistedState = serde_json::from_str(&raw)?;
    if envelope.version != STATE_VERSION {
        return Err(StorageError::VersionMismatch {
            found: envelope.version,
            expected: STATE_VERSION,
        });
    }

    Ok(Some(envelope.state))
}

/// Serialize the whole record and write it under [`TIMER_STORAGE_KEY`]
pub fn save_timer_store(storage: &dyn KeyValueStorage, store: &TimerStore) -> Result<(), StorageError> {
    let envelope = PersistedState {
        state: store.clone(),
        version: STATE_VERSION,
    };
    storage.set_item(TIMER_STORAGE_KEY, &serde_json::to_string(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_first_launch_has_no_record() {
        let storage = MemoryStorage::new();
        assert_eq!(load_timer_store(&storage).unwrap(), None);
    }

    #[test]
    fn test_envelope_layout() {
        let storage = MemoryStorage::new();
        let store = TimerStore {
            target_time: None,
            is_running: false,
            paused_time: Some(12),
            duration: Some(1),
        };
        save_timer_store(&storage, &store).unwrap();

        let raw = storage.get_item(TIMER_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["pausedTime"], 12);
        assert_eq!(load_timer_store(&storage).unwrap(), Some(store));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                TIMER_STORAGE_KEY,
                r#"{"state":{"targetTime":null,"isRunning":false,"pausedTime":null,"duration":null},"version":3}"#,
            )
            .unwrap();
        assert!(matches!(
            load_timer_store(&storage),
            Err(StorageError::VersionMismatch { found: 3, expected: 0 })
        ));
    }
}

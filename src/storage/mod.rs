//! Key-value persistence module
//!
//! The timer record is written through to a flat key-value store after every
//! change and read back once at startup.

pub mod file;
pub mod memory;
pub mod persist;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use persist::{load_timer_store, save_timer_store, PersistedState, STATE_VERSION, TIMER_STORAGE_KEY};

use crate::error::StorageError;

/// String-keyed storage for serialized values
pub trait KeyValueStorage: Send + Sync + std::fmt::Debug {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

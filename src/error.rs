//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the timer engine's intent handlers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Duration was zero, negative, or not a number
    #[error("invalid duration '{0}': expected a positive whole number of minutes")]
    InvalidDuration(String),

    /// Adding the remaining time to the clock left the representable range
    #[error("{0}s from now is outside the supported time range")]
    TimeOverflow(u64),
}

/// Errors raised by the key-value persistence layer
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed storage contents: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported persisted state version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("storage backend lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the shared application state
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),
}

//! Core error types for rewire-core.
//!
//! Nothing in this crate is fatal to a running session. Validation errors
//! reject a single operation, storage errors are logged and swallowed by the
//! persistence layer, and corrupted snapshots fall back to defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rewire-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing store cannot be reached (disabled, locked, unopenable)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backing store refused the write for lack of space
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Any other backend failure
    #[error("Storage backend failed: {0}")]
    Backend(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Dot-path key does not exist
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors. The caller is expected to re-prompt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Daily cost outside `(0, 10000]` or not finite
    #[error("Invalid daily cost {value}: must be a finite amount greater than 0 and at most 10000")]
    InvalidDailyCost { value: f64 },

    /// Mood outside `1..=5`
    #[error("Invalid mood {mood}: must be between 1 and 5")]
    InvalidMood { mood: u8 },

    /// Journal text empty or longer than the limit
    #[error("Invalid journal text length {len}: must be between 1 and 1000 characters")]
    InvalidJournalText { len: usize },

    /// `start()` called while a streak is already running
    #[error("Streak is already active")]
    AlreadyActive,

    /// Reinsertion of an entry whose id is still present
    #[error("Journal entry {id} already exists")]
    DuplicateEntry { id: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => match code.code {
                rusqlite::ErrorCode::DiskFull => StoreError::QuotaExceeded,
                rusqlite::ErrorCode::DatabaseLocked
                | rusqlite::ErrorCode::DatabaseBusy
                | rusqlite::ErrorCode::CannotOpen
                | rusqlite::ErrorCode::ReadOnly => StoreError::Unavailable(err.to_string()),
                _ => StoreError::Backend(err.to_string()),
            },
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

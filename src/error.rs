//! Error types for the ANNOTA core

use thiserror::Error;

/// Result type for bookmark store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Bookmark store error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid annotation: {0}")]
    Validation(String),

    #[error("Storage quota exceeded: {0}. Please free up some space.")]
    QuotaExceeded(String),

    #[error("Failed to save annotation: {0}")]
    Write(String),

    #[error("Failed to serialize annotation: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the user can resolve this error themselves (e.g. by deleting bookmarks)
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded(_))
    }
}

/// Storage port errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Quota exceeded for key {key}: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::QuotaExceeded { .. } => StoreError::QuotaExceeded(err.to_string()),
            _ => StoreError::Write(err.to_string()),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

//! Error types for the storage module.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Backend(#[from] rusqlite::Error),

    /// Stored value is not valid JSON.
    #[error("malformed value under key {key}: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Stored or supplied value is valid JSON but not an object.
    #[error("value under key {key} is not a JSON object")]
    NotARecord { key: String },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Backend cannot be used (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

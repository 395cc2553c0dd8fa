//! Error types for the facade.

use thiserror::Error;
use uistate_storage::StorageError;

/// Errors surfaced by uistate.
///
/// Call tracking has no error type of its own: `CallTracker::call` returns the
/// wrapped operation's error unchanged. Use [`Error::Operation`] to carry its
/// message alongside storage errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A tracked operation failed.
    #[error("operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Wrap a failed operation's error, keeping its message.
    pub fn operation(err: impl std::fmt::Display) -> Self {
        Self::Operation(err.to_string())
    }
}

/// Result type for uistate operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::operation("boom");
        assert_eq!(err.to_string(), "operation failed: boom");

        let err: Error = StorageError::NotARecord { key: "k".into() }.into();
        assert_eq!(err.to_string(), "storage error: value under key k is not a JSON object");
    }
}

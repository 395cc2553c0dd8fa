//! StorageBackend trait: the key→string capability a store is built on.
//!
//! This mirrors the browser `Storage` surface that matters here:
//! `getItem`, `setItem` and `removeItem`.

use crate::error::Result;

/// A string-valued key/value backend.
///
/// Implementations are shared process-wide: every store using the same key
/// string on the same backend sees the same value.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value at `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` at `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Backend for environments without persistent storage.
///
/// Writes are accepted and dropped, reads are always absent, and nothing
/// ever fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBackend;

impl StorageBackend for NoopBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

//! # uistate
//!
//! UI state helpers: async call tracking and keyed persistent records.
//!
//! ## Overview
//!
//! Two independent utilities:
//!
//! - **Call tracking**: [`CallTracker`] wraps an async operation and exposes
//!   `data`, `error` and `loading` for it, with `call`, `call_if_pristine`,
//!   `reset_data` and `reset_error`.
//! - **Keyed storage**: [`KeyedStore`] reads one JSON record from a storage
//!   backend and writes partial updates back with a shallow merge.
//!
//! ## Usage
//!
//! ```rust
//! use uistate::{CallTracker, StorageConfig};
//!
//! # async fn example() -> uistate::Result<()> {
//! // Keyed storage, backend chosen once from configuration.
//! let config = StorageConfig::default().with_namespace("app");
//! let store = config.store(config.open_or_fallback(), "prefs");
//! store.merge(&serde_json::json!({ "theme": "dark" }))?;
//!
//! // Call tracking around any async closure.
//! let tracker = CallTracker::new(|id: u64| async move {
//!     Ok::<_, std::io::Error>(id * 10)
//! });
//! let _ = tracker.call_if_pristine(4).await;
//! assert_eq!(tracker.data(), Some(40));
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! - `uistate::fetch` - Call tracking (`CallTracker`, `CallState`, `Operation`)
//! - `uistate::storage` - Backends, `KeyedStore`, `StorageConfig`

pub mod error;

// Re-export component crates
pub use uistate_fetch as fetch;
pub use uistate_storage as storage;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use uistate_fetch::{CallPhase, CallState, CallTracker, Operation};
pub use uistate_storage::{
    BackendConfig, KeyedStore, MemoryBackend, NoopBackend, Record, SqliteBackend,
    StorageBackend, StorageConfig, StorageError,
};

//! # uistate storage
//!
//! Keyed JSON records over pluggable storage backends.
//!
//! ## Overview
//!
//! A [`KeyedStore`] reads and writes one flat JSON object (a [`Record`]) under a
//! single key of a [`StorageBackend`]. Writes are shallow merges: fields already
//! stored survive unless the new partial value overwrites them.
//!
//! The backend is injected at construction. [`StorageConfig`] picks one once,
//! up front; nothing branches on the environment at call time.
//!
//! ## Key Types
//!
//! - [`StorageBackend`] - The key→string capability every backend provides
//! - [`NoopBackend`] - Accepts writes, never returns anything
//! - [`MemoryBackend`] - Process-local map shared between clones
//! - [`SqliteBackend`] - Persistent SQLite-backed storage
//! - [`KeyedStore`] - `get` / `set` for one key
//! - [`StorageConfig`] - Backend selection and key namespacing
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use uistate_storage::{KeyedStore, MemoryBackend, Record};
//!
//! let store = KeyedStore::new("prefs", Arc::new(MemoryBackend::new()));
//!
//! let first: Record = json!({ "theme": "dark" }).as_object().cloned().unwrap();
//! let second: Record = json!({ "lang": "en" }).as_object().cloned().unwrap();
//! store.set(first).unwrap();
//! store.set(second).unwrap();
//!
//! let record = store.get().unwrap().unwrap();
//! assert_eq!(record["theme"], "dark");
//! assert_eq!(record["lang"], "en");
//! ```
//!
//! ## Design Notes
//!
//! - **Shallow merge**: nested objects are replaced wholesale, not merged.
//! - **Corrupt data is reported**: a stored value that is not valid JSON
//!   surfaces as [`StorageError::Deserialize`] from both `get` and `set`.
//! - **Not atomic**: `set` is read-modify-write; a concurrent external writer
//!   to the same key between the read and the write is lost.

pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod store;

pub use backend::{NoopBackend, StorageBackend};
pub use config::{BackendConfig, StorageConfig};
pub use error::{Result, StorageError};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::{shallow_merge, KeyedStore, Record};

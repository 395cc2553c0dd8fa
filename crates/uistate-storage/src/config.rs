//! Storage configuration: which backend to use and how keys are namespaced.
//!
//! The backend is chosen once, when the configuration is opened, and handed to
//! every store built from it.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::backend::{NoopBackend, StorageBackend};
use crate::error::Result;
use crate::memory::MemoryBackend;
use crate::sqlite::SqliteBackend;
use crate::store::KeyedStore;

/// Which backend to open.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// No persistence: the no-op backend.
    Disabled,
    /// Process-local memory.
    #[default]
    Memory,
    /// SQLite database file.
    Sqlite { path: PathBuf },
}

/// Configuration for keyed stores.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection.
    pub backend: BackendConfig,
    /// Prefix for every key, joined with `:`.
    pub namespace: Option<String>,
}

impl StorageConfig {
    /// Configuration for environments with no persistent storage.
    pub fn disabled() -> Self {
        Self {
            backend: BackendConfig::Disabled,
            namespace: None,
        }
    }

    /// Configuration for a SQLite file.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::Sqlite { path: path.into() },
            namespace: None,
        }
    }

    /// Set the key namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Open the configured backend.
    pub fn open(&self) -> Result<Arc<dyn StorageBackend>> {
        let backend: Arc<dyn StorageBackend> = match &self.backend {
            BackendConfig::Disabled => Arc::new(NoopBackend),
            BackendConfig::Memory => Arc::new(MemoryBackend::new()),
            BackendConfig::Sqlite { path } => Arc::new(SqliteBackend::open(path)?),
        };
        Ok(backend)
    }

    /// Open the configured backend, falling back to the no-op backend if it
    /// cannot be opened.
    ///
    /// With the fallback, stores never fail because storage is missing, but
    /// nothing they write persists.
    pub fn open_or_fallback(&self) -> Arc<dyn StorageBackend> {
        match self.open() {
            Ok(backend) => backend,
            Err(e) => {
                tracing::warn!(
                    backend = ?self.backend,
                    error = %e,
                    "storage backend unavailable, falling back to no-op storage"
                );
                Arc::new(NoopBackend)
            }
        }
    }

    /// The full storage key for `key`, namespaced if configured.
    pub fn qualify(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, key),
            None => key.to_string(),
        }
    }

    /// Build a store for `key` on an already opened backend.
    pub fn store(&self, backend: Arc<dyn StorageBackend>, key: &str) -> KeyedStore {
        KeyedStore::new(self.qualify(key), backend)
    }
}

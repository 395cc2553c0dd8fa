//! In-memory implementation of the StorageBackend trait.
//!
//! Same semantics as SQLite but nothing outlives the process. Clones share
//! one map, the way every page of an origin shares one `localStorage`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::backend::StorageBackend;
use crate::error::{Result, StorageError};

/// In-memory backend. Thread-safe via RwLock.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    ///
    /// Counts through a poisoned lock: the map is still readable, and a
    /// count cannot leave it half-updated.
    pub fn len(&self) -> usize {
        match self.items.read() {
            Ok(items) => items.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Unavailable(format!("lock poisoned: {}", e))
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_basic() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get_item("a").unwrap(), None);

        backend.set_item("a", "1").unwrap();
        backend.set_item("a", "2").unwrap();
        assert_eq!(backend.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(backend.len(), 1);

        backend.remove_item("a").unwrap();
        assert_eq!(backend.get_item("a").unwrap(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_len_survives_poisoned_lock() {
        let backend = MemoryBackend::new();
        backend.set_item("a", "1").unwrap();

        let items = backend.items.clone();
        let _ = std::thread::spawn(move || {
            let _guard = items.write().unwrap();
            panic!("writer panicked");
        })
        .join();

        assert_eq!(backend.len(), 1);
        assert!(matches!(
            backend.get_item("a"),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn test_clones_share_items() {
        let a = MemoryBackend::new();
        let b = a.clone();

        a.set_item("shared", "yes").unwrap();
        assert_eq!(b.get_item("shared").unwrap().as_deref(), Some("yes"));
    }
}

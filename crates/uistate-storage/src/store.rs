//! KeyedStore: one JSON record under one key of a backend.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::backend::StorageBackend;
use crate::error::{Result, StorageError};

/// A flat mapping of field names to JSON values.
pub type Record = Map<String, Value>;

/// Shallow-merge `partial` over `base`.
///
/// Fields of `partial` win on collision; fields only in `base` are kept.
/// Nested objects are replaced, not merged.
pub fn shallow_merge(mut base: Record, partial: Record) -> Record {
    for (field, value) in partial {
        base.insert(field, value);
    }
    base
}

/// Reads and writes a single [`Record`] at a fixed key.
///
/// The backend is injected; use [`NoopBackend`](crate::NoopBackend) where
/// nothing should persist.
#[derive(Clone)]
pub struct KeyedStore {
    key: String,
    backend: Arc<dyn StorageBackend>,
}

impl KeyedStore {
    /// Create a store for `key` on `backend`.
    pub fn new(key: impl Into<String>, backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            key: key.into(),
            backend,
        }
    }

    /// The storage key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backend this store writes to.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Read and decode the stored record.
    ///
    /// Returns `None` when nothing, an empty string, or JSON `null` is stored.
    /// A value that is not valid JSON is an error, as is an array or scalar.
    pub fn get(&self) -> Result<Option<Record>> {
        let raw = match self.backend.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let value: Value =
            serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
                key: self.key.clone(),
                source,
            })?;

        match value {
            Value::Object(record) => Ok(Some(record)),
            Value::Null => Ok(None),
            _ => Err(StorageError::NotARecord {
                key: self.key.clone(),
            }),
        }
    }

    /// Merge `partial` into the stored record and write it back.
    ///
    /// Read-modify-write: not atomic with respect to other writers of the
    /// same key.
    pub fn set(&self, partial: Record) -> Result<()> {
        let current = self.get()?.unwrap_or_default();
        let merged = shallow_merge(current, partial);
        let encoded = serde_json::to_string(&merged)?;

        tracing::debug!(key = %self.key, fields = merged.len(), "writing record");
        self.backend.set_item(&self.key, &encoded)
    }

    /// Decode the stored record into `T`.
    ///
    /// `T` is usually a struct of optional fields, the Rust shape of a
    /// partial record.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match self.get()? {
            Some(record) => {
                let value = serde_json::from_value(Value::Object(record)).map_err(|source| {
                    StorageError::Deserialize {
                        key: self.key.clone(),
                        source,
                    }
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode `partial` and merge it into the stored record.
    ///
    /// `partial` must encode as a JSON object. `None` fields are skipped so
    /// they do not overwrite stored values; use `#[serde(skip_serializing_if)]`
    /// or a `Record` directly to control this per field.
    pub fn merge<T: Serialize>(&self, partial: &T) -> Result<()> {
        match serde_json::to_value(partial)? {
            Value::Object(record) => {
                let present = record.into_iter().filter(|(_, v)| !v.is_null()).collect();
                self.set(present)
            }
            _ => Err(StorageError::NotARecord {
                key: self.key.clone(),
            }),
        }
    }

    /// Remove the stored record entirely.
    pub fn clear(&self) -> Result<()> {
        tracing::debug!(key = %self.key, "clearing record");
        self.backend.remove_item(&self.key)
    }
}

impl fmt::Debug for KeyedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedStore").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NoopBackend;
    use crate::memory::MemoryBackend;
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn memory_store(key: &str) -> (KeyedStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        (KeyedStore::new(key, Arc::new(backend.clone())), backend)
    }

    #[test]
    fn test_get_unwritten_is_none() {
        let (store, _) = memory_store("never");
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_set_merges() {
        let (store, _) = memory_store("prefs");
        store.set(record(json!({ "a": 1 }))).unwrap();
        store.set(record(json!({ "b": 2 }))).unwrap();

        assert_eq!(store.get().unwrap(), Some(record(json!({ "a": 1, "b": 2 }))));
    }

    #[test]
    fn test_set_overwrites_colliding_fields() {
        let (store, _) = memory_store("prefs");
        store.set(record(json!({ "a": 1, "b": 1 }))).unwrap();
        store.set(record(json!({ "b": 2 }))).unwrap();

        assert_eq!(store.get().unwrap(), Some(record(json!({ "a": 1, "b": 2 }))));
    }

    #[test]
    fn test_nested_values_are_replaced() {
        let (store, _) = memory_store("prefs");
        store
            .set(record(json!({ "layout": { "left": 1, "right": 2 } })))
            .unwrap();
        store.set(record(json!({ "layout": { "left": 5 } }))).unwrap();

        assert_eq!(
            store.get().unwrap(),
            Some(record(json!({ "layout": { "left": 5 } })))
        );
    }

    #[test]
    fn test_noop_backend_never_persists() {
        let store = KeyedStore::new("x", Arc::new(NoopBackend));
        store.set(record(json!({ "x": 1 }))).unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_malformed_json_propagates() {
        let (store, backend) = memory_store("broken");
        backend.set_item("broken", "{not json").unwrap();

        assert!(matches!(
            store.get(),
            Err(StorageError::Deserialize { ref key, .. }) if key == "broken"
        ));
        // set reads first, so it fails the same way and leaves the value alone.
        assert!(matches!(
            store.set(record(json!({ "a": 1 }))),
            Err(StorageError::Deserialize { .. })
        ));
        assert_eq!(
            backend.get_item("broken").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let (store, backend) = memory_store("scalar");
        backend.set_item("scalar", "42").unwrap();
        assert!(matches!(store.get(), Err(StorageError::NotARecord { .. })));
    }

    #[test]
    fn test_empty_string_reads_as_absent() {
        let (store, backend) = memory_store("blank");
        backend.set_item("blank", "").unwrap();
        assert_eq!(store.get().unwrap(), None);

        store.set(record(json!({ "a": true }))).unwrap();
        assert_eq!(store.get().unwrap(), Some(record(json!({ "a": true }))));
    }

    #[test]
    fn test_null_reads_as_absent() {
        let (store, backend) = memory_store("nulled");
        backend.set_item("nulled", "null").unwrap();
        assert_eq!(store.get().unwrap(), None);

        // A later write starts from an empty record.
        store.set(record(json!({ "a": 1 }))).unwrap();
        assert_eq!(store.get().unwrap(), Some(record(json!({ "a": 1 }))));
    }

    #[test]
    fn test_stores_share_backend_by_key() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
        let first = KeyedStore::new("shared", backend.clone());
        let second = KeyedStore::new("shared", backend.clone());
        let other = KeyedStore::new("other", backend);

        first.set(record(json!({ "a": 1 }))).unwrap();
        second.set(record(json!({ "b": 2 }))).unwrap();

        assert_eq!(first.get().unwrap(), Some(record(json!({ "a": 1, "b": 2 }))));
        assert_eq!(other.get().unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let (store, backend) = memory_store("prefs");
        store.set(record(json!({ "a": 1 }))).unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        assert!(backend.is_empty());
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: Option<String>,
        font_size: Option<u32>,
    }

    #[test]
    fn test_typed_load_and_merge() {
        let (store, _) = memory_store("prefs");
        assert_eq!(store.load::<Prefs>().unwrap(), None);

        store
            .merge(&Prefs {
                theme: Some("dark".into()),
                font_size: Some(14),
            })
            .unwrap();
        // A None field must not wipe the stored value.
        store
            .merge(&Prefs {
                theme: None,
                font_size: Some(16),
            })
            .unwrap();

        assert_eq!(
            store.load::<Prefs>().unwrap(),
            Some(Prefs {
                theme: Some("dark".into()),
                font_size: Some(16),
            })
        );
    }

    #[test]
    fn test_merge_rejects_non_object() {
        let (store, _) = memory_store("prefs");
        assert!(matches!(
            store.merge(&vec![1, 2, 3]),
            Err(StorageError::NotARecord { .. })
        ));
    }

    fn flat_record() -> impl Strategy<Value = Record> {
        prop::collection::btree_map("[a-e]", any::<i64>(), 0..5).prop_map(|fields| {
            fields
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_keeps_old_fields_and_prefers_new(base in flat_record(), partial in flat_record()) {
            let merged = shallow_merge(base.clone(), partial.clone());

            for (field, value) in &partial {
                prop_assert_eq!(merged.get(field), Some(value));
            }
            for (field, value) in &base {
                if !partial.contains_key(field) {
                    prop_assert_eq!(merged.get(field), Some(value));
                }
            }
            prop_assert!(merged.keys().all(|k| base.contains_key(k) || partial.contains_key(k)));
        }

        #[test]
        fn set_then_get_matches_merge(base in flat_record(), partial in flat_record()) {
            let (store, _) = memory_store("prop");
            store.set(base.clone()).unwrap();
            store.set(partial.clone()).unwrap();

            let expected = shallow_merge(base, partial);
            prop_assert_eq!(store.get().unwrap().unwrap_or_default(), expected);
        }
    }
}

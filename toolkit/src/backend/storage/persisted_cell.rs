//! # Persisted Cell
//!
//! A typed value mirrored into a [`KeyValueStore`]. Reads come from the
//! in-memory mirror; writes update the mirror and then write through to the
//! store immediately.
//!
//! ## Failure behavior
//!
//! - Loading never fails. A missing payload yields the default silently; a
//!   corrupt payload or unreadable store yields the default and logs a warning.
//!   Use [`PersistedCell::try_load`] to tell "absent" and "corrupt" apart.
//! - Writing is best effort. If serialization or the store write fails (for
//!   example the quota is exhausted) the failure is logged, the mirror keeps
//!   the new value, and the stored payload is left as it was.
//!
//! There is no synchronization between cells: two cells on the same key each
//! keep their own mirror and the last write wins in the store.

use log::{debug, error, warn};
use std::sync::Arc;

use super::error::StorageError;
use super::stored_value::StoredValue;
use super::traits::KeyValueStore;

pub struct PersistedCell<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    default: T,
    value: T,
}

impl<T: StoredValue> PersistedCell<T> {
    /// Open the cell for `key`, falling back to `default` if the stored value
    /// is absent or unusable
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = match Self::try_load(store.as_ref(), &key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No stored value for {}, using default", key);
                default.clone()
            }
            Err(e) => {
                warn!("Falling back to default for {}: {}", key, e);
                default.clone()
            }
        };

        Self {
            store,
            key,
            default,
            value,
        }
    }

    /// Read and validate the stored value.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// [`StorageError::Corrupt`] when something is stored but unusable.
    pub fn try_load(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = store.read(key)? else {
            return Ok(None);
        };

        let value = T::decode(&raw).map_err(|reason| StorageError::corrupt(key, reason))?;
        value
            .validate()
            .map_err(|reason| StorageError::corrupt(key, reason))?;
        Ok(Some(value))
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value. Returns true if the write reached the store.
    pub fn set(&mut self, value: T) -> bool {
        self.value = value;
        self.persist()
    }

    /// Replace the value with `f(current)`. Returns true if the write reached the store.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next)
    }

    /// Restore the default and drop the stored payload
    pub fn reset(&mut self) -> bool {
        self.value = self.default.clone();
        match self.store.remove(&self.key) {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to clear stored value for {}: {}", self.key, e);
                false
            }
        }
    }

    /// Re-read the store, replacing the mirror with whatever another writer left there
    pub fn reload(&mut self) {
        self.value = match Self::try_load(self.store.as_ref(), &self.key) {
            Ok(Some(value)) => value,
            Ok(None) => self.default.clone(),
            Err(e) => {
                warn!("Falling back to default for {}: {}", self.key, e);
                self.default.clone()
            }
        };
    }

    fn persist(&self) -> bool {
        let payload = match serde_json::to_string(&self.value) {
            Ok(payload) => payload,
            Err(source) => {
                let e = StorageError::Serialize {
                    key: self.key.clone(),
                    source,
                };
                error!("{}", e);
                return false;
            }
        };

        match self.store.write(&self.key, &payload) {
            Ok(()) => true,
            Err(e) => {
                error!("Value for {} kept in memory only: {}", self.key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryStore;
    use shared::{AssetItem, AssetType, PropertyType};
    use std::collections::BTreeMap;

    fn memory() -> (MemoryStore, Arc<dyn KeyValueStore>) {
        let store = MemoryStore::new();
        let shared: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        (store, shared)
    }

    #[test]
    fn test_unknown_key_returns_default() {
        let (_, store) = memory();
        let cell = PersistedCell::load(store, "ns:missing", 42i64);
        assert_eq!(*cell.get(), 42);
    }

    #[test]
    fn test_set_round_trips_through_store() {
        let (_, store) = memory();
        let mut cell = PersistedCell::load(store.clone(), "ns:names", Vec::<String>::new());
        assert!(cell.set(vec!["a".to_string(), "b".to_string()]));

        let reopened = PersistedCell::load(store, "ns:names", Vec::<String>::new());
        assert_eq!(reopened.get(), &vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_update_applies_function_to_current_value() {
        let (raw, store) = memory();
        let mut cell = PersistedCell::load(store, "ns:count", 1i64);
        cell.update(|n| n + 1);
        cell.update(|n| n * 10);
        assert_eq!(*cell.get(), 20);
        assert_eq!(raw.read("ns:count").unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_default() {
        let (raw, store) = memory();
        raw.write("ns:flag", "{not json").unwrap();

        let cell = PersistedCell::load(store.clone(), "ns:flag", true);
        assert!(*cell.get());

        let err = PersistedCell::<bool>::try_load(store.as_ref(), "ns:flag").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_try_load_distinguishes_absent_from_corrupt() {
        let (raw, store) = memory();
        assert!(PersistedCell::<String>::try_load(store.as_ref(), "ns:s").unwrap().is_none());

        raw.write("ns:s", "12").unwrap();
        let err = PersistedCell::<String>::try_load(store.as_ref(), "ns:s").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_invalid_record_is_treated_as_corrupt() {
        let (raw, store) = memory();
        raw.write(
            "ns:assets",
            r#"[{"id":"asset::1","name":"Car","value":-5,"asset_type":"vehicle"}]"#,
        )
        .unwrap();

        let cell = PersistedCell::load(store, "ns:assets", Vec::<AssetItem>::new());
        assert!(cell.get().is_empty());
    }

    #[test]
    fn test_legacy_assets_are_migrated_on_load() {
        let (raw, store) = memory();
        raw.write(
            "ns:assets",
            r#"[{"id":"asset::1","name":"House","value":200000,
                "asset_type":"home","assignment":"split"}]"#,
        )
        .unwrap();

        let cell = PersistedCell::load(store, "ns:assets", Vec::<AssetItem>::new());
        assert_eq!(cell.get().len(), 1);
        assert_eq!(cell.get()[0].property_type, PropertyType::Marital);
    }

    #[test]
    fn test_quota_failure_keeps_mirror_and_old_payload() {
        let raw = MemoryStore::with_quota(16);
        let store: Arc<dyn KeyValueStore> = Arc::new(raw.clone());
        let mut cell = PersistedCell::load(store, "ns:s", String::new());

        assert!(cell.set("short".to_string()));
        let long = "x".repeat(64);
        assert!(!cell.set(long.clone()));

        assert_eq!(cell.get(), &long);
        assert_eq!(raw.read("ns:s").unwrap().as_deref(), Some("\"short\""));
    }

    #[test]
    fn test_serialization_failure_is_logged_not_raised() {
        // Maps with non-string keys cannot be written as JSON objects
        #[derive(Clone, serde::Serialize, serde::Deserialize)]
        struct Keyed(BTreeMap<(u8, u8), u8>);
        impl StoredValue for Keyed {}

        let (raw, store) = memory();
        let mut cell = PersistedCell::load(store, "ns:keyed", Keyed(BTreeMap::new()));
        let mut map = BTreeMap::new();
        map.insert((1, 2), 3);

        assert!(!cell.set(Keyed(map)));
        assert_eq!(cell.get().0.len(), 1);
        assert_eq!(raw.read("ns:keyed").unwrap(), None);
    }

    #[test]
    fn test_reset_restores_default_and_clears_store() {
        let (raw, store) = memory();
        let mut cell = PersistedCell::load(store, "ns:items", vec!["a".to_string()]);
        cell.set(vec!["b".to_string()]);

        assert!(cell.reset());
        assert_eq!(cell.get(), &vec!["a".to_string()]);
        assert_eq!(raw.read("ns:items").unwrap(), None);
    }

    #[test]
    fn test_last_writer_wins_across_cells() {
        let (_, store) = memory();
        let mut first = PersistedCell::load(store.clone(), "ns:n", 0i64);
        let mut second = PersistedCell::load(store.clone(), "ns:n", 0i64);

        first.set(1);
        second.set(2);
        assert_eq!(*first.get(), 1);

        first.reload();
        assert_eq!(*first.get(), 2);
    }

    #[test]
    fn test_new_asset_items_persist() {
        let (_, store) = memory();
        let mut cell = PersistedCell::load(store.clone(), "ns:assets", Vec::<AssetItem>::new());
        let item = AssetItem::new("Savings", 10_000.0, AssetType::Bank);
        cell.update(|items| {
            let mut items = items.clone();
            items.push(item.clone());
            items
        });

        let reopened = PersistedCell::load(store, "ns:assets", Vec::<AssetItem>::new());
        assert_eq!(reopened.get(), &vec![item]);
    }
}

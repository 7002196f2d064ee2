//! In-memory storage adapter.
//!
//! Used by tests and by embedders that keep tool state for a single session.
//! An optional byte quota reproduces the "quota exceeded" failure of browser
//! storage: a write that would push the total payload size over the quota is
//! rejected and leaves the store unchanged.

use log::debug;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::StorageError;
use super::traits::{validate_key, KeyValueStore};

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once payloads exceed `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently stored across all payloads
    pub fn used_bytes(&self) -> usize {
        self.lock().values().map(String::len).sum()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.lock();

        if let Some(quota) = self.quota_bytes {
            let existing = entries.get(key).map(String::len).unwrap_or(0);
            let used: usize = entries.values().map(String::len).sum::<usize>() - existing;
            let available = quota.saturating_sub(used);
            if payload.len() > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: payload.len(),
                    available,
                });
            }
        }

        debug!("Memory store write {} ({} bytes)", key, payload.len());
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.lock().remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.read("k").unwrap(), None);

        store.write("k", "[1,2,3]").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);

        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.write("shared", "true").unwrap();
        assert_eq!(other.read("shared").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_quota_rejects_oversized_write_and_keeps_old_value() {
        let store = MemoryStore::with_quota(10);
        store.write("a", "12345").unwrap();

        let err = store.write("b", "1234567").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 7, available: 5, .. }));
        assert_eq!(store.read("b").unwrap(), None);

        // Replacing an existing payload only counts the difference
        store.write("a", "1234567890").unwrap();
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(store.write("../x", "1"), Err(StorageError::InvalidKey(_))));
    }
}

//! # Storage Traits
//!
//! This module defines the storage adapter abstraction that lets persisted
//! tool state live in different backends (process memory, a directory of JSON
//! files) without the domain layer knowing which one it is talking to.

use super::error::StorageError;

/// A flat string-keyed store of serialized payloads.
///
/// Adapters store raw JSON text; parsing, validation and default fallback
/// belong to [`PersistedCell`](super::PersistedCell). Writes are synchronous
/// and visible to the next read on the same adapter.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw payload stored under `key`, or `None` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored under `key`
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Remove the payload stored under `key`
    /// Returns true if something was removed
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// List every key currently holding a payload, sorted
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Keys are used verbatim by the memory adapter and as file names by the file
/// adapter, so both accept the same conservative character set.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("ohio-divorce-toolkit:asset-division").is_ok());
        assert!(validate_key("budget_v2.items").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("with space").is_err());
        assert!(validate_key("a/b").is_err());
    }
}

//! Error type shared by every storage adapter and the persisted cell.

/// Failures reading or writing persisted tool state
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The stored payload exists but could not be parsed or failed validation
    #[error("Stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O failure for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn corrupt(key: &str, reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}

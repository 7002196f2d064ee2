//! Registry of the storage keys owned by each tool.
//!
//! Every persisted payload lives under `<namespace>:<tool key>`. The namespace
//! comes from configuration and the registry is handed to whoever opens cells,
//! so tests can run several isolated toolkits against one store.

use std::fmt;

pub const DEFAULT_NAMESPACE: &str = "ohio-divorce-toolkit";

/// The payloads persisted by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AssetDivision,
    ChildSupportInputs,
    SpousalSupportInputs,
    Budget,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::AssetDivision,
        StorageKey::ChildSupportInputs,
        StorageKey::SpousalSupportInputs,
        StorageKey::Budget,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StorageKey::AssetDivision => "asset-division",
            StorageKey::ChildSupportInputs => "child-support-inputs",
            StorageKey::SpousalSupportInputs => "spousal-support-inputs",
            StorageKey::Budget => "budget",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Maps tool keys to fully qualified storage keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRegistry {
    namespace: String,
}

impl KeyRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self, key: StorageKey) -> String {
        format!("{}:{}", self.namespace, key.name())
    }

    /// All registered keys with their qualified names, in registry order
    pub fn entries(&self) -> Vec<(StorageKey, String)> {
        StorageKey::ALL.iter().map(|k| (*k, self.key(*k))).collect()
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

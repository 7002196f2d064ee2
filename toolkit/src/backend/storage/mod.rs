//! # Storage Module
//!
//! Persistence for tool state. The domain layer only sees typed
//! [`PersistedCell`]s; where the bytes end up is decided by the
//! [`KeyValueStore`] adapter handed in at construction time.
//!
//! ## Adapters
//!
//! - [`MemoryStore`]: process memory, with an optional quota
//! - [`FileStore`]: one JSON document per key in the data directory
//!
//! ## Key Responsibilities
//!
//! - **Key registry**: every tool's storage key, namespaced by configuration
//! - **Boundary validation**: payloads are parsed and validated on read
//! - **Migration**: legacy asset records are upgraded on read
//! - **Configuration**: the YAML config file with guideline constants

pub mod config_repository;
pub mod error;
pub mod file_store;
pub mod keys;
pub mod memory_store;
pub mod migration;
pub mod persisted_cell;
pub mod stored_value;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use config_repository::{ConfigRepository, ToolkitConfig};
pub use error::StorageError;
pub use file_store::{default_data_directory, FileStore};
pub use keys::{KeyRegistry, StorageKey};
pub use memory_store::MemoryStore;
pub use migration::{migrate_asset_payload, MigrationReport};
pub use persisted_cell::PersistedCell;
pub use stored_value::StoredValue;
pub use traits::KeyValueStore;

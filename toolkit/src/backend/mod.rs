//! # Backend Module
//!
//! Contains all non-UI logic for the Ohio divorce toolkit.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (any frontend, or the toolkit-report binary)
//!     ↓
//! Domain Layer (estimators, aggregators, worksheet state, export)
//!     ↓
//! Storage Layer (persisted cells over a key-value adapter)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Load configuration and resolve the data directory
//! - Pick the storage adapter and key registry
//! - Hand the domain layer everything it needs at construction time

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::domain::{ExportService, ToolkitService};
use crate::backend::storage::{
    ConfigRepository, FileStore, KeyRegistry, KeyValueStore, MemoryStore, ToolkitConfig,
};

/// Main application state that holds all services
pub struct AppState {
    pub config: ToolkitConfig,
    pub data_directory: Option<PathBuf>,
    pub toolkit: ToolkitService,
    pub export_service: ExportService,
}

/// Initialize the backend against a data directory on disk.
/// `None` resolves the default data directory.
pub fn initialize_backend(data_directory: Option<PathBuf>) -> Result<AppState> {
    info!("Setting up file storage");
    let store = match data_directory {
        Some(dir) => FileStore::new(dir)?,
        None => FileStore::new_default()?,
    };
    let base_directory = store.base_directory().to_path_buf();

    info!("Loading configuration from {}", base_directory.display());
    let config = ConfigRepository::new(&base_directory).load_or_create()?;

    Ok(build_state(config, Arc::new(store), Some(base_directory)))
}

/// Initialize the backend with nothing persisted beyond this process
pub fn initialize_in_memory(config: ToolkitConfig) -> Result<AppState> {
    config.validate()?;
    Ok(build_state(config, Arc::new(MemoryStore::new()), None))
}

fn build_state(
    config: ToolkitConfig,
    store: Arc<dyn KeyValueStore>,
    data_directory: Option<PathBuf>,
) -> AppState {
    info!("Setting up domain model");
    let registry = KeyRegistry::new(config.storage_namespace.clone());
    let toolkit = ToolkitService::new(store, registry, config.guidelines.clone());

    AppState {
        config,
        data_directory,
        toolkit,
        export_service: ExportService::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::TestEnvironment;
    use shared::{AssetItem, AssetType};

    #[test]
    fn test_initialize_backend_creates_config_and_persists() {
        let env = TestEnvironment::new().unwrap();

        let mut state = initialize_backend(Some(env.base_path.clone())).unwrap();
        assert!(env.base_path.join("toolkit_config.yaml").exists());
        state
            .toolkit
            .add_asset(AssetItem::new("Savings", 5_000.0, AssetType::Bank))
            .unwrap();

        let state = initialize_backend(Some(env.base_path.clone())).unwrap();
        assert_eq!(state.toolkit.assets().len(), 1);
        assert_eq!(state.data_directory, Some(env.base_path.clone()));
    }

    #[test]
    fn test_initialize_in_memory_rejects_bad_config() {
        let mut config = ToolkitConfig::default();
        config.storage_namespace = String::new();
        assert!(initialize_in_memory(config).is_err());

        let state = initialize_in_memory(ToolkitConfig::default()).unwrap();
        assert!(state.data_directory.is_none());
        assert!(state.toolkit.assets().is_empty());
    }
}

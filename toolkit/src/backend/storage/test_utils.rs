//! Test utilities for file-backed storage.
//!
//! Provides RAII-based cleanup that guarantees test data is removed even if
//! tests panic or fail.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::file_store::FileStore;

/// Test environment that removes its data directory on drop
pub struct TestEnvironment {
    /// Kept alive so the directory survives until the environment is dropped
    _temp_dir: TempDir,
    pub store: FileStore,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let store = FileStore::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            store,
            base_path,
        })
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("DIVORCE_TOOLKIT_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}

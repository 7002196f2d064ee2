//! File-backed storage adapter.
//!
//! Each key is stored as one JSON document in the data directory:
//!
//! ```text
//! Ohio Divorce Toolkit/
//! ├── toolkit_config.yaml
//! ├── ohio-divorce-toolkit~asset-division.json
//! ├── ohio-divorce-toolkit~budget.json
//! └── ...
//! ```
//!
//! `:` is not portable in file names, so it is written as `~`. Writes go to a
//! temporary sibling file that is synced and renamed over the target, so a
//! crash never leaves a half-written payload behind.

use anyhow::Result;
use log::{debug, error, info, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::error::StorageError;
use super::traits::{validate_key, KeyValueStore};

pub const DATA_DIR_ENV: &str = "DIVORCE_TOOLKIT_DATA_DIR";
const DEFAULT_DIR_NAME: &str = "Ohio Divorce Toolkit";
const REDIRECT_FILE: &str = ".toolkit_redirect";
const PAYLOAD_EXTENSION: &str = "json";

#[derive(Clone)]
pub struct FileStore {
    base_directory: PathBuf,
    tmp_counter: Arc<AtomicU64>,
}

impl FileStore {
    /// Open a store rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            tmp_counter: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Open a store in the default data directory
    pub fn new_default() -> Result<Self> {
        Self::new(default_data_directory()?)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn payload_path(&self, key: &str) -> PathBuf {
        let file_name = format!("{}.{}", key.replace(':', "~"), PAYLOAD_EXTENSION);
        self.base_directory.join(file_name)
    }

    fn tmp_path(&self, target: &Path) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.tmp.{}", file_name, counter))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.payload_path(key);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(StorageError::corrupt(key, format!("payload is not UTF-8: {}", e)))
            }
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let target = self.payload_path(key);
        let temp = self.tmp_path(&target);

        let written = (|| -> std::io::Result<()> {
            fs::create_dir_all(&self.base_directory)?;
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp, &target)
        })();

        if let Err(e) = written {
            if temp.exists() {
                if let Err(cleanup) = fs::remove_file(&temp) {
                    warn!("Failed to remove temp file {}: {}", temp.display(), cleanup);
                }
            }
            error!("Failed to write {}: {}", target.display(), e);
            return Err(StorageError::io(key, e));
        }

        debug!("Wrote {} ({} bytes)", target.display(), payload.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.payload_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let directory = self.base_directory.display().to_string();
        let entries =
            fs::read_dir(&self.base_directory).map_err(|e| StorageError::io(&directory, e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&directory, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PAYLOAD_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let key = stem.replace('~', ":");
            if validate_key(&key).is_ok() {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Resolve the data directory.
///
/// Order: the `DIVORCE_TOOLKIT_DATA_DIR` environment variable, then
/// `<Documents>/Ohio Divorce Toolkit` (following a `.toolkit_redirect` file in
/// that directory if one points at an existing directory), then the same
/// folder under the home directory.
pub fn default_data_directory() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
            return Ok(PathBuf::from(dir.trim()));
        }
    }

    let parent = dirs::document_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine documents or home directory"))?;
    let default_dir = parent.join(DEFAULT_DIR_NAME);

    Ok(follow_redirect(&default_dir).unwrap_or(default_dir))
}

fn follow_redirect(dir: &Path) -> Option<PathBuf> {
    let redirect_file = dir.join(REDIRECT_FILE);
    if !redirect_file.exists() {
        return None;
    }

    match fs::read_to_string(&redirect_file) {
        Ok(target) => {
            let path = PathBuf::from(target.trim());
            if path.is_dir() {
                info!("Found redirect file, using data directory: {}", path.display());
                Some(path)
            } else {
                warn!(
                    "Redirect file points to non-existent directory: {}. Using default.",
                    path.display()
                );
                None
            }
        }
        Err(e) => {
            error!("Failed to read redirect file: {}. Using default directory.", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::TestEnvironment;

    #[test]
    fn test_write_then_read() {
        let env = TestEnvironment::new().unwrap();
        let store = &env.store;

        assert_eq!(store.read("ns:budget").unwrap(), None);
        store.write("ns:budget", "[]").unwrap();
        assert_eq!(store.read("ns:budget").unwrap().as_deref(), Some("[]"));

        assert!(env.base_path.join("ns~budget.json").exists());
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let env = TestEnvironment::new().unwrap();
        env.store.write("ns:k", "1").unwrap();
        env.store.write("ns:k", "2").unwrap();

        let names: Vec<String> = fs::read_dir(&env.base_path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ns~k.json".to_string()]);
        assert_eq!(env.store.read("ns:k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_keys_skip_foreign_files() {
        let env = TestEnvironment::new().unwrap();
        env.store.write("ns:b", "1").unwrap();
        env.store.write("ns:a", "1").unwrap();
        fs::write(env.base_path.join("toolkit_config.yaml"), "x: 1").unwrap();
        fs::write(env.base_path.join("notes.txt"), "hello").unwrap();

        assert_eq!(env.store.keys().unwrap(), vec!["ns:a".to_string(), "ns:b".to_string()]);
    }

    #[test]
    fn test_remove() {
        let env = TestEnvironment::new().unwrap();
        env.store.write("ns:k", "1").unwrap();
        assert!(env.store.remove("ns:k").unwrap());
        assert!(!env.store.remove("ns:k").unwrap());
    }

    #[test]
    fn test_follow_redirect() {
        let env = TestEnvironment::new().unwrap();
        let target = env.base_path.join("moved");
        fs::create_dir_all(&target).unwrap();
        fs::write(env.base_path.join(REDIRECT_FILE), format!("{}\n", target.display())).unwrap();

        assert_eq!(follow_redirect(&env.base_path), Some(target));
    }

    #[test]
    fn test_redirect_to_missing_directory_is_ignored() {
        let env = TestEnvironment::new().unwrap();
        fs::write(env.base_path.join(REDIRECT_FILE), "/definitely/not/here").unwrap();
        assert_eq!(follow_redirect(&env.base_path), None);
    }
}

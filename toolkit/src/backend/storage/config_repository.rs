//! # Toolkit Config Repository
//!
//! Stores the toolkit configuration as `toolkit_config.yaml` at the root of
//! the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! storage_namespace: "ohio-divorce-toolkit"
//! data_format_version: "1.0"
//! guidelines:
//!   shared_parenting_threshold: 90
//!   minimum_support: 50.0
//!   # ... any omitted guideline falls back to its default
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::GuidelineConstants;
use std::fs;
use std::path::{Path, PathBuf};

use super::keys::DEFAULT_NAMESPACE;

pub const CONFIG_FILE_NAME: &str = "toolkit_config.yaml";
pub const DATA_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Prefix for every storage key
    pub storage_namespace: String,
    /// Data format version for future migrations
    pub data_format_version: String,
    #[serde(default)]
    pub guidelines: GuidelineConstants,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            guidelines: GuidelineConstants::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl ToolkitConfig {
    /// Reject constants the estimators cannot work with
    pub fn validate(&self) -> Result<()> {
        let g = &self.guidelines;
        if self.storage_namespace.trim().is_empty() {
            anyhow::bail!("storage_namespace cannot be empty");
        }
        if g.child_support_rates.is_empty() {
            anyhow::bail!("child_support_rates must list at least one rate");
        }
        if g.child_support_rates.iter().any(|r| !(0.0..=1.0).contains(r)) {
            anyhow::bail!("child_support_rates must be between 0 and 1");
        }
        if g.max_children == 0 {
            anyhow::bail!("max_children must be at least 1");
        }
        if g.spousal_duration_tiers.is_empty() {
            anyhow::bail!("spousal_duration_tiers must list at least one tier");
        }
        if g.spousal_duration_tiers.iter().any(|t| t.min_multiplier > t.max_multiplier) {
            anyhow::bail!("spousal duration tier min_multiplier exceeds max_multiplier");
        }
        if g.min_combined_income > g.max_combined_income {
            anyhow::bail!("min_combined_income exceeds max_combined_income");
        }
        Ok(())
    }
}

/// YAML-backed configuration repository
#[derive(Clone)]
pub struct ConfigRepository {
    base_directory: PathBuf,
}

impl ConfigRepository {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_directory.join(CONFIG_FILE_NAME)
    }

    /// Load the config, creating the default file if it doesn't exist
    pub fn load_or_create(&self) -> Result<ToolkitConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: ToolkitConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            config.validate()?;
            debug!("Loaded toolkit config from {:?}", config_path);
            Ok(config)
        } else {
            let config = ToolkitConfig::default();
            self.save(&config)?;
            info!("Created default toolkit config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Write the config through a temp file
    pub fn save(&self, config: &ToolkitConfig) -> Result<()> {
        config.validate()?;
        fs::create_dir_all(&self.base_directory)?;

        let config_path = self.config_path();
        let temp_path = self.base_directory.join(format!("{}.tmp", CONFIG_FILE_NAME));
        let yaml_content = serde_yaml::to_string(config)?;
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved toolkit config to {:?}", config_path);
        Ok(())
    }

    /// Replace the guideline constants and bump `updated_at`
    pub fn update_guidelines(&self, guidelines: GuidelineConstants) -> Result<ToolkitConfig> {
        let mut config = self.load_or_create()?;
        config.guidelines = guidelines;
        config.updated_at = Utc::now().to_rfc3339();
        self.save(&config)?;
        info!("Updated guideline constants in {:?}", self.config_path());
        Ok(config)
    }
}

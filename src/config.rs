//! Project configuration (`albumd.toml`)

use crate::store::{JsonFileStore, DEFAULT_SNAPSHOT_DIR};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up in the project root
pub const CONFIG_FILE: &str = "albumd.toml";

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Collection file, relative to the project root unless absolute
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Sibling directory of the collection file that receives snapshots
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Actor recorded in `audit.updated_by`
    #[serde(default = "default_updated_by")]
    pub updated_by: String,

    /// Default number of albums printed by `list`
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/database.json")
}

fn default_snapshot_dir() -> String {
    DEFAULT_SNAPSHOT_DIR.to_string()
}

fn default_updated_by() -> String {
    "cli".to_string()
}

fn default_list_limit() -> usize {
    20
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            snapshot_dir: default_snapshot_dir(),
            updated_by: default_updated_by(),
            list_limit: default_list_limit(),
        }
    }
}

impl TrackerConfig {
    /// Load `albumd.toml` from the project root, or defaults if it is missing
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        Self::load_from(&project_root.join(CONFIG_FILE))
    }

    /// Load config from an explicit file, or defaults if it is missing
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: TrackerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to `albumd.toml` in the project root
    pub fn save(&self, project_root: &Path) -> anyhow::Result<PathBuf> {
        let config_path = project_root.join(CONFIG_FILE);
        std::fs::create_dir_all(project_root)?;

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// Collection path resolved against the project root
    pub fn resolve_db_path(&self, project_root: &Path) -> PathBuf {
        if self.db_path.is_absolute() {
            self.db_path.clone()
        } else {
            project_root.join(&self.db_path)
        }
    }

    /// Store handle for the configured collection file
    pub fn store(&self, project_root: &Path) -> JsonFileStore {
        JsonFileStore::new(self.resolve_db_path(project_root)).with_snapshot_dir(&self.snapshot_dir)
    }
}

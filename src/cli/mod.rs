//! Command implementations behind the `albumd` binary
//!
//! Each command resolves a [`Workspace`], performs one service call, and
//! prints a short result.

pub mod album;
pub mod export;
pub mod init;
pub mod query;
pub mod snapshot;
pub mod stage;

use crate::config::TrackerConfig;
use crate::store::JsonFileStore;
use crate::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved configuration and store for one invocation
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: TrackerConfig,
    pub store: JsonFileStore,
}

impl Workspace {
    /// Resolve against the current directory.
    ///
    /// `config_path` replaces `albumd.toml` in the current directory; `db`
    /// overrides the configured collection path.
    pub fn resolve(config_path: Option<&Path>, db: Option<&Path>) -> Result<Self> {
        let root = env::current_dir()?;
        Self::resolve_in(&root, config_path, db)
    }

    /// Resolve against an explicit project root
    pub fn resolve_in(root: &Path, config_path: Option<&Path>, db: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => TrackerConfig::load_from(path)?,
            None => TrackerConfig::load(root)?,
        };
        if let Some(db) = db {
            config.db_path = db.to_path_buf();
        }

        let store = config.store(root);
        tracing::debug!(db = %store.path().display(), "resolved workspace");

        Ok(Self {
            root: root.to_path_buf(),
            config,
            store,
        })
    }

    /// Actor recorded on every change
    pub fn actor(&self) -> &str {
        &self.config.updated_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_defaults() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::resolve_in(temp.path(), None, None).unwrap();
        assert_eq!(workspace.store.path(), temp.path().join("data/database.json"));
        assert_eq!(workspace.actor(), "cli");
    }

    #[test]
    fn test_db_override_and_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("custom.toml");
        std::fs::write(&config_path, "updated_by = \"sam\"\n").unwrap();

        let workspace =
            Workspace::resolve_in(temp.path(), Some(&config_path), Some(Path::new("reviews.json")))
                .unwrap();
        assert_eq!(workspace.store.path(), temp.path().join("reviews.json"));
        assert_eq!(workspace.actor(), "sam");
    }
}

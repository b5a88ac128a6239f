//! JsonFileStore - whole-file JSON persistence

use super::CollectionStore;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Collection;
use crate::utils::{now_iso, snapshot_stamp};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory, next to the collection file, that receives snapshots
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Collection stored as a single pretty-printed JSON file.
///
/// Saves replace the file atomically (temp file in the same directory, then
/// rename), so readers never see a partial write. There is no locking: two
/// processes that load, modify, and save the same file concurrently race, and
/// the last save wins, silently dropping the other's changes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot_dir: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot_dir: DEFAULT_SNAPSHOT_DIR.to_string(),
        }
    }

    /// Use a different sibling directory name for snapshots
    pub fn with_snapshot_dir(mut self, dir: impl Into<String>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Directory that holds the collection file
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.parent_dir().join(&self.snapshot_dir)
    }

    fn read(&self) -> TrackerResult<Collection> {
        let content = fs::read_to_string(&self.path).map_err(|e| TrackerError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|source| TrackerError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_atomic(&self, content: &str) -> TrackerResult<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(&parent).map_err(|e| TrackerError::io(&parent, e))?;

        let mut temp_file = NamedTempFile::new_in(&parent).map_err(|e| TrackerError::io(&parent, e))?;
        temp_file
            .write_all(content.as_bytes())
            .and_then(|_| temp_file.flush())
            .map_err(|e| TrackerError::io(temp_file.path(), e))?;

        temp_file.persist(&self.path).map_err(|e| TrackerError::Persist {
            path: self.path.clone(),
            reason: e.error.to_string(),
        })?;

        Ok(())
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self) -> TrackerResult<Collection> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "collection file missing, creating");
            let mut collection = Collection::new();
            self.save(&mut collection)?;
            return Ok(collection);
        }

        let collection = self.read()?;
        tracing::debug!(
            path = %self.path.display(),
            albums = collection.len(),
            version = collection.meta.version,
            "loaded collection"
        );
        Ok(collection)
    }

    fn save(&self, collection: &mut Collection) -> TrackerResult<()> {
        collection.meta.updated_at = now_iso();
        let content = to_sorted_json(collection)?;
        self.write_atomic(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            albums = collection.len(),
            "saved collection"
        );
        Ok(())
    }

    fn snapshot(&self) -> TrackerResult<PathBuf> {
        let collection = self.load()?;
        let content = to_sorted_json(&collection)?;

        let dir = self.snapshot_dir();
        fs::create_dir_all(&dir).map_err(|e| TrackerError::io(&dir, e))?;

        let stamp = snapshot_stamp();
        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("{}.json", stamp)
            } else {
                format!("{}-{}.json", stamp, attempt)
            };
            let snap_path = dir.join(name);
            attempt += 1;

            // create_new keeps earlier snapshots from being overwritten
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&snap_path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(TrackerError::io(&snap_path, e)),
            };
            file.write_all(content.as_bytes())
                .map_err(|e| TrackerError::io(&snap_path, e))?;

            tracing::debug!(path = %snap_path.display(), "wrote snapshot");
            return Ok(snap_path);
        }
    }
}

/// Pretty JSON with object keys sorted at every level
pub fn to_sorted_json<T: Serialize>(value: &T) -> TrackerResult<String> {
    let value = sort_keys(serde_json::to_value(value)?);
    Ok(serde_json::to_string_pretty(&value)?)
}

fn sort_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(sort_keys).collect())
        }
        other => other,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, Stage, SCHEMA_VERSION};
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, JsonFileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("data").join("database.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_load_creates_missing_file() {
        let (_temp, store) = setup_store();
        assert!(!store.exists());

        let collection = store.load().unwrap();

        assert!(store.exists());
        assert!(collection.albums.is_empty());
        assert_eq!(collection.meta.version, SCHEMA_VERSION);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["albums"], serde_json::json!([]));
        assert_eq!(raw["meta"]["version"], 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp, store) = setup_store();
        let mut collection = store.load().unwrap();

        let mut album = Album::new("2024-01-01-a-b", "A", "B");
        album.transition(Stage::Scripted, Some("go"), false, None).unwrap();
        collection.upsert(album.clone());
        store.save(&mut collection).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.albums, vec![album]);
        assert_eq!(reloaded.meta, collection.meta);
    }

    #[test]
    fn test_saved_keys_are_sorted() {
        let (_temp, store) = setup_store();
        let mut collection = store.load().unwrap();
        collection.upsert(Album::new("x", "A", "B"));
        store.save(&mut collection).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let albums_pos = content.find("\"albums\"").unwrap();
        let meta_pos = content.find("\"meta\"").unwrap();
        assert!(albums_pos < meta_pos);

        let album_pos = content.find("\"album\":").unwrap();
        let artist_pos = content.find("\"artist\":").unwrap();
        let tracklist_pos = content.find("\"tracklist\":").unwrap();
        assert!(album_pos < artist_pos && artist_pos < tracklist_pos);
    }

    #[test]
    fn test_save_is_reproducible() {
        let (_temp, store) = setup_store();
        let mut collection = store.load().unwrap();
        collection.upsert(Album::new("x", "A", "B"));
        collection.meta.updated_at = "2024-01-01T00:00:00Z".to_string();

        let first = to_sorted_json(&collection).unwrap();
        let second = to_sorted_json(&collection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let (_temp, store) = setup_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, TrackerError::Parse { .. }));
        assert!(err.is_storage());
        // The malformed file is left alone
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_snapshot_writes_sibling_copy() {
        let (_temp, store) = setup_store();
        let mut collection = store.load().unwrap();
        collection.upsert(Album::new("x", "A", "B"));
        store.save(&mut collection).unwrap();
        let live_before = fs::read_to_string(store.path()).unwrap();

        let snap = store.snapshot().unwrap();

        assert_eq!(snap.parent().unwrap(), store.snapshot_dir());
        assert!(snap.file_name().unwrap().to_string_lossy().ends_with(".json"));
        assert_eq!(fs::read_to_string(&snap).unwrap(), live_before);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), live_before);
    }

    #[test]
    fn test_snapshots_never_overwrite() {
        let (_temp, store) = setup_store();
        let first = store.snapshot().unwrap();
        let second = store.snapshot().unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn test_custom_snapshot_dir() {
        let (temp, store) = setup_store();
        let store = store.with_snapshot_dir("backups");
        let snap = store.snapshot().unwrap();
        assert!(snap.starts_with(temp.path().join("data").join("backups")));
    }

    #[test]
    fn test_relative_path_without_parent() {
        let store = JsonFileStore::new("database.json");
        assert_eq!(store.snapshot_dir(), PathBuf::from(".").join("snapshots"));
    }
}

//! The in-memory collection: metadata plus the ordered album list

use super::album::Album;
use super::validation::ValidationWarning;
use crate::error::{TrackerError, TrackerResult};
use crate::utils::now_iso;
use serde::{Deserialize, Serialize};

/// Collection file format version
pub const SCHEMA_VERSION: u32 = 1;

/// Collection metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionMeta {
    /// Advisory format version; there is no migration step
    pub version: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl CollectionMeta {
    pub fn new() -> Self {
        let now = now_iso();
        Self {
            version: SCHEMA_VERSION,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Default for CollectionMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Every tracked album, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub meta: CollectionMeta,

    #[serde(default)]
    pub albums: Vec<Album>,
}

impl Collection {
    /// An empty collection with fresh metadata
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Find an album by identity
    pub fn find_by_id(&self, id: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.id() == id)
    }

    /// Like [`find_by_id`](Self::find_by_id) but missing is an error
    pub fn require(&self, id: &str) -> TrackerResult<&Album> {
        self.find_by_id(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))
    }

    /// Replace the album with the same identity in place, or append it
    pub fn upsert(&mut self, album: Album) {
        match self.albums.iter().position(|a| a.id() == album.id()) {
            Some(pos) => self.albums[pos] = album,
            None => self.albums.push(album),
        }
    }

    /// Append an album whose identity must not exist yet
    pub fn insert_new(&mut self, album: Album) -> TrackerResult<()> {
        if self.contains(album.id()) {
            return Err(TrackerError::Duplicate(album.id().to_string()));
        }
        self.albums.push(album);
        Ok(())
    }

    /// Remove an album by identity; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        match self.albums.iter().position(|a| a.id() == id) {
            Some(pos) => {
                self.albums.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Validation warnings for every album, in collection order
    pub fn validate(&self) -> Vec<ValidationWarning> {
        self.albums.iter().flat_map(Album::validate).collect()
    }
}

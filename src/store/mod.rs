//! Collection persistence
//!
//! The whole collection lives in one JSON file that is read completely,
//! changed in memory, and written back completely. Callers only see the
//! [`CollectionStore`] trait, so the file format or write strategy can change
//! without touching them.

mod json_store;

pub use json_store::{to_sorted_json, JsonFileStore, DEFAULT_SNAPSHOT_DIR};

use crate::error::TrackerResult;
use crate::models::Collection;
use std::path::PathBuf;

/// Load/save/snapshot access to a persisted collection
pub trait CollectionStore {
    /// Read the collection, creating and persisting an empty one if none exists
    fn load(&self) -> TrackerResult<Collection>;

    /// Stamp `meta.updated_at` and persist the whole collection
    fn save(&self, collection: &mut Collection) -> TrackerResult<()>;

    /// Write a point-in-time copy of the persisted collection and return its path
    fn snapshot(&self) -> TrackerResult<PathBuf>;
}

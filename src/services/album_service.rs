//! Album service - load, change, and save workflows behind each command
//!
//! Every mutating function loads the whole collection, applies one change,
//! and saves the whole collection again. Nothing is saved when the change
//! fails.

use crate::error::TrackerResult;
use crate::models::{Album, AlbumStats, Collection, Stage, Track, Transition, ValidationWarning};
use crate::store::CollectionStore;
use crate::utils::{derive_id, UNKNOWN_RELEASE_DATE};
use std::path::PathBuf;

/// Input for creating a new album
#[derive(Debug, Clone, Default)]
pub struct NewAlbumInput {
    pub artist: String,
    pub album: String,
    pub release_date: Option<String>,
    pub genre: Vec<String>,
    pub cover_image_path: Option<String>,
    pub tags: Vec<String>,
}

impl NewAlbumInput {
    /// Identity the album will receive
    pub fn derived_id(&self) -> String {
        derive_id(
            self.release_date.as_deref().unwrap_or(UNKNOWN_RELEASE_DATE),
            &self.artist,
            &self.album,
        )
    }

    fn into_album(self, actor: &str) -> Album {
        let mut album = Album::new(self.derived_id(), self.artist, self.album)
            .with_genres(self.genre)
            .with_tags(self.tags)
            .created_by(actor);
        album.release_date = self.release_date;
        album.cover_image_path = self.cover_image_path;
        album
    }
}

/// Load the collection, creating the file if needed
pub fn init<S: CollectionStore>(store: &S) -> TrackerResult<Collection> {
    store.load()
}

/// Validation warnings across the whole collection
pub fn check<S: CollectionStore>(store: &S) -> TrackerResult<Vec<ValidationWarning>> {
    Ok(store.load()?.validate())
}

/// Insert a new album; fails with `Duplicate` if its identity exists
pub fn add_album<S: CollectionStore>(store: &S, input: NewAlbumInput, actor: &str) -> TrackerResult<Album> {
    let mut collection = store.load()?;
    let album = input.into_album(actor);

    collection.insert_new(album.clone())?;
    store.save(&mut collection)?;

    tracing::debug!(id = album.id(), "added album");
    Ok(album)
}

/// Fetch one album
pub fn get_album<S: CollectionStore>(store: &S, id: &str) -> TrackerResult<Album> {
    let collection = store.load()?;
    collection.require(id).cloned()
}

/// Apply `change` to a copy of one album, then upsert and save it.
///
/// Nothing is saved if `change` fails.
fn update_album<S, T, F>(store: &S, id: &str, change: F) -> TrackerResult<T>
where
    S: CollectionStore,
    F: FnOnce(&mut Album) -> TrackerResult<T>,
{
    let mut collection = store.load()?;
    let mut album = collection.require(id)?.clone();
    let result = change(&mut album)?;
    collection.upsert(album);
    store.save(&mut collection)?;
    Ok(result)
}

pub fn set_field<S: CollectionStore>(
    store: &S,
    id: &str,
    field: &str,
    value: &str,
    actor: &str,
) -> TrackerResult<()> {
    update_album(store, id, |album| album.set_field(field, value, Some(actor)))
}

pub fn add_track<S: CollectionStore>(store: &S, id: &str, track: Track, actor: &str) -> TrackerResult<()> {
    update_album(store, id, |album| album.add_track(track, Some(actor)))
}

pub fn set_track_rating<S: CollectionStore>(
    store: &S,
    id: &str,
    track_no: u32,
    rating: f64,
    actor: &str,
) -> TrackerResult<()> {
    update_album(store, id, |album| album.set_track_rating(track_no, rating, Some(actor)))
}

/// Move an album to another stage and return the recorded transition
pub fn set_stage<S: CollectionStore>(
    store: &S,
    id: &str,
    to: Stage,
    note: Option<&str>,
    force: bool,
    actor: &str,
) -> TrackerResult<Transition> {
    let transition = update_album(store, id, |album| album.transition(to, note, force, Some(actor)))?;

    tracing::debug!(id, %to, force, "stage changed");
    Ok(transition)
}

/// Remove an album; returns whether it existed
pub fn remove_album<S: CollectionStore>(store: &S, id: &str) -> TrackerResult<bool> {
    let mut collection = store.load()?;
    let removed = collection.remove(id);
    if removed {
        store.save(&mut collection)?;
    }
    Ok(removed)
}

pub fn stats<S: CollectionStore>(store: &S, id: &str) -> TrackerResult<AlbumStats> {
    Ok(get_album(store, id)?.stats())
}

pub fn snapshot<S: CollectionStore>(store: &S) -> TrackerResult<PathBuf> {
    store.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::store::JsonFileStore;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, JsonFileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("database.json"));
        (temp_dir, store)
    }

    fn input(artist: &str, album: &str) -> NewAlbumInput {
        NewAlbumInput {
            artist: artist.to_string(),
            album: album.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_album_derives_id_and_audit() {
        let (_temp, store) = setup_store();
        let album = add_album(
            &store,
            NewAlbumInput {
                release_date: Some("2024-01-01".to_string()),
                genre: vec!["rap".to_string()],
                ..input("Kendrick Lamar", "To Pimp a Butterfly")
            },
            "cli",
        )
        .unwrap();

        assert_eq!(album.id(), "2024-01-01-kendrick-lamar-to-pimp-a-butterfly");
        assert_eq!(album.audit.updated_by.as_deref(), Some("cli"));
        assert_eq!(get_album(&store, album.id()).unwrap(), album);
    }

    #[test]
    fn test_add_album_without_date_uses_placeholder() {
        let (_temp, store) = setup_store();
        let album = add_album(&store, input("A", "B"), "cli").unwrap();
        assert_eq!(album.id(), "0000-00-00-a-b");
    }

    #[test]
    fn test_add_duplicate_fails() {
        let (_temp, store) = setup_store();
        add_album(&store, input("A", "B"), "cli").unwrap();
        let err = add_album(&store, input("a", "b!"), "cli").unwrap_err();
        assert!(matches!(err, TrackerError::Duplicate(_)));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_album_is_not_found() {
        let (_temp, store) = setup_store();
        store.load().unwrap();

        assert!(matches!(
            set_field(&store, "nope", "best_moment", "x", "cli"),
            Err(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            add_track(&store, "nope", Track::new(1, "x"), "cli"),
            Err(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            set_stage(&store, "nope", Stage::Scripted, None, false, "cli"),
            Err(TrackerError::NotFound(_))
        ));
        assert!(matches!(stats(&store, "nope"), Err(TrackerError::NotFound(_))));
    }

    #[test]
    fn test_tracks_and_stats() {
        let (_temp, store) = setup_store();
        let id = add_album(&store, input("A", "B"), "cli").unwrap().id().to_string();

        add_track(&store, &id, Track::new(1, "One").with_rating(5.0), "cli").unwrap();
        add_track(&store, &id, Track::new(2, "Two"), "cli").unwrap();
        set_track_rating(&store, &id, 2, 7.0, "cli").unwrap();

        let stats = stats(&store, &id).unwrap();
        assert_eq!(stats.average, Some(6.0));
        assert_eq!(stats.top.unwrap().title, "Two");
        assert_eq!(stats.low.unwrap().title, "One");
    }

    #[test]
    fn test_set_stage_persists_history() {
        let (_temp, store) = setup_store();
        let id = add_album(&store, input("A", "B"), "cli").unwrap().id().to_string();

        let transition = set_stage(&store, &id, Stage::Scripted, Some("script done"), false, "cli").unwrap();
        assert_eq!(transition.from_stage, Some(Stage::Ideation));
        assert_eq!(transition.note, "script done");

        let album = get_album(&store, &id).unwrap();
        assert_eq!(album.stage(), Stage::Scripted);
        assert_eq!(album.status().history(), &[transition]);
    }

    #[test]
    fn test_invalid_stage_change_is_not_saved() {
        let (_temp, store) = setup_store();
        let id = add_album(&store, input("A", "B"), "cli").unwrap().id().to_string();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = set_stage(&store, &id, Stage::Published, None, false, "cli").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);

        set_stage(&store, &id, Stage::Published, Some("skip ahead"), true, "cli").unwrap();
        assert_eq!(get_album(&store, &id).unwrap().stage(), Stage::Published);
    }

    #[test]
    fn test_check_reports_warnings() {
        let (_temp, store) = setup_store();
        let id = add_album(&store, input("A", "B"), "cli").unwrap().id().to_string();
        assert!(check(&store).unwrap().is_empty());

        set_field(&store, &id, "final_score", "42", "cli").unwrap();
        let warnings = check(&store).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message(), "final_score out of range");
    }

    #[test]
    fn test_remove_album() {
        let (_temp, store) = setup_store();
        let id = add_album(&store, input("A", "B"), "cli").unwrap().id().to_string();

        assert!(remove_album(&store, &id).unwrap());
        assert!(!remove_album(&store, &id).unwrap());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_position() {
        let (_temp, store) = setup_store();
        add_album(&store, input("A", "One"), "cli").unwrap();
        let id = add_album(&store, input("B", "Two"), "cli").unwrap().id().to_string();
        add_album(&store, input("C", "Three"), "cli").unwrap();

        set_field(&store, &id, "review_notes", "great", "cli").unwrap();

        let collection = store.load().unwrap();
        let ids: Vec<&str> = collection.albums.iter().map(Album::id).collect();
        assert_eq!(ids, vec!["0000-00-00-a-one", id.as_str(), "0000-00-00-c-three"]);
        assert_eq!(collection.albums[1].review_notes.as_deref(), Some("great"));
    }

    #[test]
    fn test_non_finite_rating_is_rejected() {
        let (_temp, store) = setup_store();
        let id = add_album(&store, input("A", "B"), "cli").unwrap().id().to_string();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = add_track(&store, &id, Track::new(1, "One").with_rating(f64::INFINITY), "cli").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidField { .. }));
        assert!(set_field(&store, &id, "final_score", "nan", "cli").is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }
}

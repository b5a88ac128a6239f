//! End-to-end review workflow through the service layer and exporters

use albumd::export::{csv, render_caption, render_template, write_output, JsonTemplate};
use albumd::models::{Stage, Track};
use albumd::services::{album_service, filter, search, AlbumFilter, NewAlbumInput};
use albumd::store::{CollectionStore, JsonFileStore};
use albumd::TrackerError;
use std::fs;
use tempfile::TempDir;

fn setup_store() -> (TempDir, JsonFileStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("database.json"));
    (temp_dir, store)
}

fn add(store: &JsonFileStore, artist: &str, album: &str, date: &str, tags: &[&str]) -> String {
    album_service::add_album(
        store,
        NewAlbumInput {
            artist: artist.to_string(),
            album: album.to_string(),
            release_date: Some(date.to_string()),
            genre: vec!["hip hop".to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        },
        "cli",
    )
    .unwrap()
    .id()
    .to_string()
}

#[test]
fn test_review_from_ideation_to_published() {
    let (temp, store) = setup_store();
    let id = add(&store, "Kendrick Lamar", "To Pimp a Butterfly", "2015-03-15", &["classic"]);
    assert_eq!(id, "2015-03-15-kendrick-lamar-to-pimp-a-butterfly");

    album_service::add_track(&store, &id, Track::new(1, "Wesley's Theory"), "cli").unwrap();
    album_service::add_track(&store, &id, Track::new(2, "Alright"), "cli").unwrap();
    album_service::set_track_rating(&store, &id, 1, 8.0, "cli").unwrap();
    album_service::set_track_rating(&store, &id, 2, 10.0, "cli").unwrap();
    album_service::set_field(&store, &id, "favourite_song", "Alright", "cli").unwrap();
    album_service::set_field(&store, &id, "final_score", "9.5", "cli").unwrap();

    for stage in [
        Stage::Scripted,
        Stage::GraphicsReady,
        Stage::VoReady,
        Stage::Editing,
        Stage::Scheduled,
        Stage::Published,
    ] {
        album_service::set_stage(&store, &id, stage, None, false, "cli").unwrap();
    }

    let album = album_service::get_album(&store, &id).unwrap();
    assert_eq!(album.stage(), Stage::Published);
    assert_eq!(album.status().history().len(), 6);
    assert!(album_service::check(&store).unwrap().is_empty());

    let stats = album_service::stats(&store, &id).unwrap();
    assert_eq!(stats.average, Some(9.0));
    assert_eq!(stats.top.unwrap().title, "Alright");

    let caption_path = temp.path().join("out").join("caption.md");
    write_output(&caption_path, &render_caption(&album)).unwrap();
    let caption = fs::read_to_string(caption_path).unwrap();
    assert!(caption.contains("Score: 9.5/10"));
    assert!(caption.ends_with("#AlbumReview #hiphop\n"));

    let capcut = render_template(&album, JsonTemplate::Capcut);
    assert_eq!(capcut["text_tracklist"], "Wesley's Theory, Alright");
}

#[test]
fn test_rejected_transition_leaves_file_untouched() {
    let (_temp, store) = setup_store();
    let id = add(&store, "A", "B", "2020-01-01", &[]);
    let before = fs::read(store.path()).unwrap();

    let err = album_service::set_stage(&store, &id, Stage::Editing, None, false, "cli").unwrap_err();
    assert_eq!(err.to_string(), "Invalid transition IDEATION -> EDITING");
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_missing_track_is_reported() {
    let (_temp, store) = setup_store();
    let id = add(&store, "A", "B", "2020-01-01", &[]);

    let err = album_service::set_track_rating(&store, &id, 9, 5.0, "cli").unwrap_err();
    assert!(matches!(err, TrackerError::TrackNotFound { track_no: 9, .. }));
}

#[test]
fn test_query_and_csv_export() {
    let (_temp, store) = setup_store();
    let first = add(&store, "Radiohead", "OK Computer", "1997-05-21", &["classic"]);
    let second = add(&store, "Radiohead", "Kid A", "2000-10-02", &[]);
    add(&store, "Björk", "Homogenic", "1997-09-22", &["classic"]);
    album_service::set_stage(&store, &second, Stage::Scripted, None, false, "cli").unwrap();

    let collection = store.load().unwrap();

    let classics = filter(
        &collection.albums,
        &AlbumFilter {
            artist: Some("Radiohead".to_string()),
            tag: Some("classic".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(classics.len(), 1);
    assert_eq!(classics[0].id(), first);

    let scripted = filter(
        &collection.albums,
        &AlbumFilter {
            stage: Some(Stage::Scripted),
            ..Default::default()
        },
    );
    assert_eq!(scripted[0].id(), second);

    assert_eq!(search(&collection.albums, "bjö").len(), 1);
    assert_eq!(search(&collection.albums, "").len(), 3);

    let albums: Vec<_> = collection.albums.iter().collect();
    let output = csv::render_csv(&albums, &csv::parse_fields(Some("id,artist,status.stage,tags"))).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], format!("{},Radiohead,IDEATION,classic", first));
    assert_eq!(lines[2], format!("{},Radiohead,SCRIPTED,", second));
}

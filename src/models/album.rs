//! Album record: the unit tracked through the production pipeline
//!
//! Field names match the collection file exactly. Every mutation goes through
//! a method that stamps the audit block, and stage changes go through the
//! lifecycle in [`Status`].

use super::stage::{Stage, Status, Transition};
use super::validation::{format_score, score_in_range, ValidationWarning};
use crate::error::{TrackerError, TrackerResult};
use crate::utils::now_iso;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One track on an album
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Position on the album; expected but not required to be unique
    pub track_no: u32,

    pub title: String,

    /// Rating out of 10
    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub duration_sec: Option<u32>,
}

impl Track {
    pub fn new(track_no: u32, title: impl Into<String>) -> Self {
        Self {
            track_no,
            title: title.into(),
            rating: None,
            duration_sec: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_duration(mut self, duration_sec: u32) -> Self {
        self.duration_sec = Some(duration_sec);
        self
    }
}

/// Track picked for best production, with its producers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestProduction {
    pub track: String,
    #[serde(default)]
    pub producer: Vec<String>,
}

/// Guest verse picked as the best feature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestFeature {
    pub artist: String,
    pub track: String,
}

/// Who touched a record and when
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Audit {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl Audit {
    /// Audit block for a record created now
    pub fn created(actor: Option<&str>) -> Self {
        let now = now_iso();
        Self {
            created_at: Some(now.clone()),
            updated_at: Some(now),
            updated_by: actor.map(str::to_string),
        }
    }

    /// Stamp an update, recording the actor when one is given
    pub fn touch(&mut self, actor: Option<&str>) {
        self.updated_at = Some(now_iso());
        if let Some(actor) = actor {
            self.updated_by = Some(actor.to_string());
        }
    }
}

/// Average, best, and worst track ratings of an album
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlbumStats {
    pub average: Option<f64>,
    pub top: Option<Track>,
    pub low: Option<Track>,
}

/// An album moving through the review pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    /// Derived identity, see [`crate::utils::derive_id`]
    id: String,

    #[serde(default)]
    pub artist: String,

    /// Album title
    #[serde(default)]
    pub album: String,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub genre: Vec<String>,

    #[serde(default)]
    pub cover_image_path: Option<String>,

    /// External links keyed by site (e.g. "spotify")
    #[serde(default)]
    pub links: BTreeMap<String, String>,

    #[serde(default)]
    pub tracklist: Vec<Track>,

    #[serde(default)]
    pub favourite_song: Option<String>,

    #[serde(default)]
    pub least_favourite_song: Option<String>,

    #[serde(default)]
    pub best_moment: Option<String>,

    #[serde(default)]
    pub best_production: Option<BestProduction>,

    #[serde(default)]
    pub best_feature: Option<BestFeature>,

    /// Overall score out of 10
    #[serde(default)]
    pub final_score: Option<f64>,

    #[serde(default)]
    pub review_notes: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    status: Status,

    /// Free-form production timings (e.g. "script_minutes")
    #[serde(default)]
    pub timing: BTreeMap<String, serde_json::Value>,

    /// Free-form asset references (e.g. "thumbnail")
    #[serde(default)]
    pub assets: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub audit: Audit,
}

impl Album {
    /// Create an album at IDEATION with a fresh audit block
    pub fn new(id: impl Into<String>, artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artist: artist.into(),
            album: album.into(),
            release_date: None,
            genre: Vec::new(),
            cover_image_path: None,
            links: BTreeMap::new(),
            tracklist: Vec::new(),
            favourite_song: None,
            least_favourite_song: None,
            best_moment: None,
            best_production: None,
            best_feature: None,
            final_score: None,
            review_notes: None,
            tags: Vec::new(),
            status: Status::new(),
            timing: BTreeMap::new(),
            assets: BTreeMap::new(),
            audit: Audit::created(None),
        }
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    pub fn with_genres(mut self, genre: Vec<String>) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_cover(mut self, path: impl Into<String>) -> Self {
        self.cover_image_path = Some(path.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracklist = tracks;
        self
    }

    /// Record who created the album
    pub fn created_by(mut self, actor: &str) -> Self {
        self.audit.updated_by = Some(actor.to_string());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn stage(&self) -> Stage {
        self.status.stage()
    }

    /// Stamp `audit.updated_at` (and `updated_by` when given)
    pub fn touch(&mut self, actor: Option<&str>) {
        self.audit.touch(actor);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Move the album to another stage, see [`Status::transition`]
    pub fn transition(
        &mut self,
        to: Stage,
        note: Option<&str>,
        force: bool,
        actor: Option<&str>,
    ) -> TrackerResult<Transition> {
        let transition = self.status.transition(to, note, force)?.clone();
        self.touch(actor);
        Ok(transition)
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    /// Append a track; duplicate track numbers are allowed
    pub fn add_track(&mut self, track: Track, actor: Option<&str>) -> TrackerResult<()> {
        if let Some(rating) = track.rating {
            finite("rating", rating)?;
        }
        self.tracklist.push(track);
        self.touch(actor);
        Ok(())
    }

    /// Rate the first track with `track_no`
    pub fn set_track_rating(&mut self, track_no: u32, rating: f64, actor: Option<&str>) -> TrackerResult<()> {
        finite("rating", rating)?;
        let track = self
            .tracklist
            .iter_mut()
            .find(|t| t.track_no == track_no)
            .ok_or_else(|| TrackerError::TrackNotFound {
                album_id: self.id.clone(),
                track_no,
            })?;
        track.rating = Some(rating);
        self.touch(actor);
        Ok(())
    }

    fn rated_tracks(&self) -> impl Iterator<Item = (&Track, f64)> {
        self.tracklist
            .iter()
            .filter_map(|t| t.rating.map(|rating| (t, rating)))
    }

    // =========================================================================
    // Validation & statistics
    // =========================================================================

    /// Non-fatal range checks on the final score and track ratings
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if let Some(score) = self.final_score {
            if !score_in_range(score) {
                warnings.push(ValidationWarning::final_score(&self.id, score));
            }
        }

        for track in &self.tracklist {
            if let Some(rating) = track.rating {
                if !score_in_range(rating) {
                    warnings.push(ValidationWarning::track_rating(&self.id, track.track_no, rating));
                }
            }
        }

        warnings
    }

    /// Mean of all present track ratings
    pub fn average_rating(&self) -> Option<f64> {
        let (sum, count) = self
            .rated_tracks()
            .fold((0.0, 0usize), |(sum, count), (_, rating)| (sum + rating, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Highest-rated track; the first one wins a tie
    pub fn top_track(&self) -> Option<&Track> {
        self.pick_track(|candidate, best| candidate > best)
    }

    /// Lowest-rated track; the first one wins a tie
    pub fn low_track(&self) -> Option<&Track> {
        self.pick_track(|candidate, best| candidate < best)
    }

    fn pick_track(&self, replaces: impl Fn(f64, f64) -> bool) -> Option<&Track> {
        let mut picked: Option<(&Track, f64)> = None;
        for (track, rating) in self.rated_tracks() {
            match picked {
                Some((_, best)) if !replaces(rating, best) => {}
                _ => picked = Some((track, rating)),
            }
        }
        picked.map(|(track, _)| track)
    }

    pub fn stats(&self) -> AlbumStats {
        AlbumStats {
            average: self.average_rating(),
            top: self.top_track().cloned(),
            low: self.low_track().cloned(),
        }
    }

    // =========================================================================
    // Field access by name
    // =========================================================================

    /// Set one field from its text form.
    ///
    /// An empty value clears optional fields. List fields take a
    /// comma-separated value; `best_production` takes `track:producer,...`
    /// and `best_feature` takes `artist:track`. Map entries are addressed as
    /// `links.<key>`, `timing.<key>` or `assets.<key>`.
    pub fn set_field(&mut self, field: &str, value: &str, actor: Option<&str>) -> TrackerResult<()> {
        let value = value.trim();

        match field {
            "id" => return Err(TrackerError::invalid_field(field, "identity is immutable")),
            "status" | "status.stage" => {
                return Err(TrackerError::invalid_field(field, "use a stage transition instead"))
            }
            "tracklist" => {
                return Err(TrackerError::invalid_field(field, "use add-track or set-track-rating"))
            }
            "audit" => return Err(TrackerError::invalid_field(field, "audit is maintained automatically")),
            "artist" => self.artist = required_text(field, value)?,
            "album" => self.album = required_text(field, value)?,
            "release_date" => self.release_date = optional_text(value),
            "cover_image_path" => self.cover_image_path = optional_text(value),
            "favourite_song" => self.favourite_song = optional_text(value),
            "least_favourite_song" => self.least_favourite_song = optional_text(value),
            "best_moment" => self.best_moment = optional_text(value),
            "review_notes" => self.review_notes = optional_text(value),
            "final_score" => {
                self.final_score = if value.is_empty() {
                    None
                } else {
                    let score = value.parse::<f64>().map_err(|_| {
                        TrackerError::invalid_field(field, format!("'{}' is not a number", value))
                    })?;
                    Some(finite(field, score)?)
                };
            }
            "genre" => self.genre = split_list(value),
            "tags" => self.tags = split_list(value),
            "best_production" => {
                self.best_production = if value.is_empty() {
                    None
                } else {
                    let (track, producers) = split_pair(field, value)?;
                    Some(BestProduction {
                        track,
                        producer: split_list(&producers),
                    })
                };
            }
            "best_feature" => {
                self.best_feature = if value.is_empty() {
                    None
                } else {
                    let (artist, track) = split_pair(field, value)?;
                    Some(BestFeature { artist, track })
                };
            }
            other => match other.split_once('.') {
                Some(("links", key)) if !key.is_empty() => {
                    if value.is_empty() {
                        self.links.remove(key);
                    } else {
                        self.links.insert(key.to_string(), value.to_string());
                    }
                }
                Some(("timing", key)) if !key.is_empty() => set_free_form(&mut self.timing, key, value),
                Some(("assets", key)) if !key.is_empty() => set_free_form(&mut self.assets, key, value),
                _ => return Err(TrackerError::invalid_field(field, "unknown field")),
            },
        }

        self.touch(actor);
        Ok(())
    }

    /// Text form of a field for tabular export; `None` when absent or unknown
    pub fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "artist" => Some(self.artist.clone()),
            "album" => Some(self.album.clone()),
            "release_date" => self.release_date.clone(),
            "genre" => Some(self.genre.join(";")),
            "cover_image_path" => self.cover_image_path.clone(),
            "favourite_song" => self.favourite_song.clone(),
            "least_favourite_song" => self.least_favourite_song.clone(),
            "best_moment" => self.best_moment.clone(),
            "best_production" => self.best_production.as_ref().map(|bp| bp.track.clone()),
            "best_feature" => self.best_feature.as_ref().map(|bf| bf.artist.clone()),
            "final_score" => self.final_score.map(format_score),
            "review_notes" => self.review_notes.clone(),
            "tags" => Some(self.tags.join(";")),
            "status.stage" | "stage" => Some(self.stage().name().to_string()),
            "track_count" => Some(self.tracklist.len().to_string()),
            "average_rating" => self.average_rating().map(|avg| format!("{:.2}", avg)),
            "audit.created_at" => self.audit.created_at.clone(),
            "audit.updated_at" => self.audit.updated_at.clone(),
            "audit.updated_by" => self.audit.updated_by.clone(),
            other => match other.split_once('.') {
                Some(("links", key)) => self.links.get(key).cloned(),
                Some(("timing", key)) => self.timing.get(key).map(free_form_text),
                Some(("assets", key)) => self.assets.get(key).map(free_form_text),
                _ => None,
            },
        }
    }
}

/// NaN and infinities cannot be stored in JSON
fn finite(field: &str, value: f64) -> TrackerResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackerError::invalid_field(field, format!("{} is not a finite number", value)))
    }
}

fn required_text(field: &str, value: &str) -> TrackerResult<String> {
    if value.is_empty() {
        return Err(TrackerError::invalid_field(field, "value cannot be empty"));
    }
    Ok(value.to_string())
}

fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split a comma-separated list, dropping blank entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_pair(field: &str, value: &str) -> TrackerResult<(String, String)> {
    match value.split_once(':') {
        Some((left, right)) if !left.trim().is_empty() => {
            Ok((left.trim().to_string(), right.trim().to_string()))
        }
        _ => Err(TrackerError::invalid_field(
            field,
            format!("expected '<name>:<value>', got '{}'", value),
        )),
    }
}

/// Store JSON literals as-is (numbers, booleans), anything else as a string
fn set_free_form(map: &mut BTreeMap<String, serde_json::Value>, key: &str, value: &str) {
    if value.is_empty() {
        map.remove(key);
        return;
    }
    let parsed = serde_json::from_str::<serde_json::Value>(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    map.insert(key.to_string(), parsed);
}

fn free_form_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

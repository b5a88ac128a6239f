use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest score or rating accepted without a warning
pub const MIN_SCORE: f64 = 0.0;

/// Highest score or rating accepted without a warning
pub const MAX_SCORE: f64 = 10.0;

/// Whether a score or rating lies in the accepted range
pub fn score_in_range(value: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&value)
}

/// Score as written in exports: whole numbers keep one decimal ("8.0")
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}

/// What a validation warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// `final_score` outside [0, 10]
    FinalScoreOutOfRange,
    /// A track rating outside [0, 10]
    TrackRatingOutOfRange,
}

/// A non-fatal problem found on an album.
///
/// Warnings never block saving; a review may be left incomplete or odd on
/// purpose while it is being written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Album the warning belongs to
    pub album_id: String,
    pub kind: WarningKind,
    /// Track number for track-level warnings
    pub track_no: Option<u32>,
    /// Offending value
    pub value: f64,
}

impl ValidationWarning {
    pub fn final_score(album_id: impl Into<String>, value: f64) -> Self {
        Self {
            album_id: album_id.into(),
            kind: WarningKind::FinalScoreOutOfRange,
            track_no: None,
            value,
        }
    }

    pub fn track_rating(album_id: impl Into<String>, track_no: u32, value: f64) -> Self {
        Self {
            album_id: album_id.into(),
            kind: WarningKind::TrackRatingOutOfRange,
            track_no: Some(track_no),
            value,
        }
    }

    /// Message without the album prefix
    pub fn message(&self) -> String {
        match (self.kind, self.track_no) {
            (WarningKind::TrackRatingOutOfRange, Some(track_no)) => {
                format!("track {} rating out of range", track_no)
            }
            (WarningKind::TrackRatingOutOfRange, None) => "track rating out of range".to_string(),
            (WarningKind::FinalScoreOutOfRange, _) => "final_score out of range".to_string(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.album_id, self.message(), self.value)
    }
}

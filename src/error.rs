//! Error taxonomy for the tracker core
//!
//! Validation problems are not errors: they come back from
//! [`Album::validate`](crate::models::Album::validate) as data so a review can
//! stay half-finished. Everything here is a hard failure the caller must
//! surface.

use crate::models::Stage;
use std::path::PathBuf;

/// Result type for tracker core operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors raised by the store, the lifecycle, and the entity setters
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Album not found: {0}")]
    NotFound(String),

    #[error("Track {track_no} not found on album {album_id}")]
    TrackNotFound { album_id: String, track_no: u32 },

    #[error("Album already exists: {0}")]
    Duplicate(String),

    #[error("Invalid transition {from} -> {to}")]
    InvalidTransition { from: Stage, to: Stage },

    #[error("Cannot set field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse collection file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to persist {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },
}

impl TrackerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrackerError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for failures of the underlying file storage
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            TrackerError::Io { .. }
                | TrackerError::Parse { .. }
                | TrackerError::Serialize(_)
                | TrackerError::Persist { .. }
        )
    }
}

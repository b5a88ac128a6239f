//! Production stage lifecycle
//!
//! Every album moves through a fixed pipeline of stages. Moves are single
//! steps along the allowed-transition graph; a forced move skips the check.
//! Each successful move is appended to the album's history, which is never
//! rewritten.

use crate::error::{TrackerError, TrackerResult};
use crate::utils::now_iso;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage of an album in the production pipeline
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Album picked, nothing written yet
    #[default]
    Ideation,
    /// Review script written
    Scripted,
    /// Thumbnails and overlays prepared
    GraphicsReady,
    /// Voice-over recorded
    VoReady,
    /// Video in the edit
    Editing,
    /// Upload scheduled
    Scheduled,
    /// Live
    Published,
    /// Retired from active tracking
    Archived,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 8] = [
        Stage::Ideation,
        Stage::Scripted,
        Stage::GraphicsReady,
        Stage::VoReady,
        Stage::Editing,
        Stage::Scheduled,
        Stage::Published,
        Stage::Archived,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Ideation => "IDEATION",
            Stage::Scripted => "SCRIPTED",
            Stage::GraphicsReady => "GRAPHICS_READY",
            Stage::VoReady => "VO_READY",
            Stage::Editing => "EDITING",
            Stage::Scheduled => "SCHEDULED",
            Stage::Published => "PUBLISHED",
            Stage::Archived => "ARCHIVED",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Stage::Ideation => "💡",
            Stage::Scripted => "📝",
            Stage::GraphicsReady => "🎨",
            Stage::VoReady => "🎙️",
            Stage::Editing => "🎬",
            Stage::Scheduled => "📅",
            Stage::Published => "✅",
            Stage::Archived => "📦",
        }
    }

    /// Stages reachable from this one in a single non-forced move.
    ///
    /// Each stage may advance one step or fall back one step, except that
    /// PUBLISHED can only be archived and ARCHIVED is terminal.
    pub fn allowed_transitions(&self) -> &'static [Stage] {
        match self {
            Stage::Ideation => &[Stage::Scripted],
            Stage::Scripted => &[Stage::GraphicsReady, Stage::Ideation],
            Stage::GraphicsReady => &[Stage::VoReady, Stage::Scripted],
            Stage::VoReady => &[Stage::Editing, Stage::GraphicsReady],
            Stage::Editing => &[Stage::Scheduled, Stage::VoReady],
            Stage::Scheduled => &[Stage::Published, Stage::Editing],
            Stage::Published => &[Stage::Archived],
            Stage::Archived => &[],
        }
    }

    pub fn can_transition_to(&self, to: Stage) -> bool {
        self.allowed_transitions().contains(&to)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = String;

    /// Parse a stage name, case-insensitive, accepting `-` for `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Stage::ALL.iter().map(Stage::name).collect();
                format!("unknown stage '{}' (expected one of {})", s, names.join(", "))
            })
    }
}

/// One recorded stage change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    /// Stage before the move (absent only for a synthetic first entry)
    #[serde(default)]
    pub from_stage: Option<Stage>,

    /// Stage after the move
    pub to_stage: Stage,

    /// When the move happened (`%Y-%m-%dT%H:%M:%SZ`)
    pub at: String,

    /// Free-text note, empty when none was given
    #[serde(default)]
    pub note: String,
}

/// Current stage plus the append-only transition log
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    #[serde(default)]
    stage: Stage,

    #[serde(default)]
    history: Vec<Transition>,
}

impl Status {
    /// A fresh status at IDEATION with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// A status sitting at `stage` with no recorded history
    pub fn with_stage(stage: Stage) -> Self {
        Self {
            stage,
            history: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Most recent transition, if any
    pub fn last_transition(&self) -> Option<&Transition> {
        self.history.last()
    }

    /// Move to `to`, recording the move in history.
    ///
    /// Without `force`, `to` must be in the current stage's allowed set;
    /// otherwise nothing changes and `InvalidTransition` is returned. With
    /// `force`, any destination is accepted, including the current stage.
    pub fn transition(&mut self, to: Stage, note: Option<&str>, force: bool) -> TrackerResult<&Transition> {
        self.transition_at(to, note, force, now_iso())
    }

    pub(crate) fn transition_at(
        &mut self,
        to: Stage,
        note: Option<&str>,
        force: bool,
        at: String,
    ) -> TrackerResult<&Transition> {
        let from = self.stage;
        if !force && !from.can_transition_to(to) {
            return Err(TrackerError::InvalidTransition { from, to });
        }

        if force && !from.can_transition_to(to) {
            tracing::debug!(%from, %to, "forcing transition outside the allowed graph");
        }

        self.history.push(Transition {
            from_stage: Some(from),
            to_stage: to,
            at,
            note: note.unwrap_or_default().to_string(),
        });
        self.stage = to;

        Ok(&self.history[self.history.len() - 1])
    }
}

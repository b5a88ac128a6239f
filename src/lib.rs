// albumd - Album review production tracker
// Tracks albums from first idea to published review video

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::TrackerConfig;
pub use error::{TrackerError, TrackerResult};
pub use models::{Album, Collection, Stage, Status, Track, Transition};
pub use store::{CollectionStore, JsonFileStore};

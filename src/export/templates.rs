//! JSON data for video/graphics templates

use super::format_score;
use crate::models::Album;
use clap::ValueEnum;
use serde_json::{json, Value};

/// Template the JSON export targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum JsonTemplate {
    /// Score-card graphic fields
    #[default]
    Canva,
    /// Video text overlays
    Capcut,
}

pub fn render_template(album: &Album, template: JsonTemplate) -> Value {
    match template {
        JsonTemplate::Canva => canva(album),
        JsonTemplate::Capcut => capcut(album),
    }
}

fn canva(album: &Album) -> Value {
    json!({
        "Album": album.album,
        "Artist": album.artist,
        "Favourite": album.favourite_song,
        "LeastFavourite": album.least_favourite_song,
        "BestMoment": album.best_moment,
        "BestProduction": album.best_production.as_ref().map(|bp| bp.track.as_str()),
        "BestFeature": album.best_feature.as_ref().map(|bf| bf.artist.as_str()),
        "FinalScore": album.final_score.map(format_score),
    })
}

fn capcut(album: &Album) -> Value {
    let titles: Vec<&str> = album.tracklist.iter().map(|t| t.title.as_str()).collect();
    json!({
        "text_intro": album.album,
        "text_tracklist": titles.join(", "),
        "text_score": album
            .final_score
            .map(format_score)
            .unwrap_or_else(|| "None".to_string()),
    })
}

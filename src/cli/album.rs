//! Album editing commands

use super::Workspace;
use crate::models::{album::split_list, Track};
use crate::services::{album_service, NewAlbumInput};
use crate::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub artist: String,

    /// Album title
    #[arg(long)]
    pub album: String,

    /// Release date (YYYY-MM-DD); unknown dates use 0000-00-00
    #[arg(long)]
    pub release_date: Option<String>,

    /// Comma-separated genres
    #[arg(long)]
    pub genre: Option<String>,

    /// Cover image path
    #[arg(long)]
    pub cover: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

pub fn run_add(workspace: &Workspace, args: AddArgs) -> Result<()> {
    let input = NewAlbumInput {
        artist: args.artist,
        album: args.album,
        release_date: args.release_date,
        genre: args.genre.as_deref().map(split_list).unwrap_or_default(),
        cover_image_path: args.cover,
        tags: args.tags,
    };

    let album = album_service::add_album(&workspace.store, input, workspace.actor())?;
    println!("{}", format!("✅ Added {}", album.id()).green());
    Ok(())
}

pub fn run_set_field(workspace: &Workspace, id: &str, field: &str, value: &str) -> Result<()> {
    album_service::set_field(&workspace.store, id, field, value, workspace.actor())?;
    println!("{}", format!("✅ {}: {} updated", id, field).green());
    Ok(())
}

#[derive(Args, Debug)]
pub struct AddTrackArgs {
    /// Album ID
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub track_no: u32,

    #[arg(long)]
    pub title: String,

    /// Rating on the 0-10 scale
    #[arg(long)]
    pub rating: Option<f64>,

    /// Duration in seconds
    #[arg(long)]
    pub duration: Option<u32>,
}

pub fn run_add_track(workspace: &Workspace, args: AddTrackArgs) -> Result<()> {
    let mut track = Track::new(args.track_no, args.title);
    track.rating = args.rating;
    track.duration_sec = args.duration;

    album_service::add_track(&workspace.store, &args.id, track, workspace.actor())?;
    println!(
        "{}",
        format!("✅ Track {} added to {}", args.track_no, args.id).green()
    );
    Ok(())
}

pub fn run_set_track_rating(workspace: &Workspace, id: &str, track_no: u32, rating: f64) -> Result<()> {
    album_service::set_track_rating(&workspace.store, id, track_no, rating, workspace.actor())?;
    println!(
        "{}",
        format!("✅ Track {} of {} rated {}", track_no, id, rating).green()
    );
    Ok(())
}

pub fn run_remove(workspace: &Workspace, id: &str) -> Result<()> {
    if album_service::remove_album(&workspace.store, id)? {
        println!("{}", format!("🗑  Removed {}", id).green());
    } else {
        println!("{}", format!("Album '{}' not found", id).yellow());
    }
    Ok(())
}

//! Read-only commands: `list`, `find`, `stats`

use super::Workspace;
use crate::models::{Album, Stage, Track};
use crate::services::{album_service, filter, search, AlbumFilter};
use crate::store::CollectionStore;
use crate::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only albums in this stage
    #[arg(long)]
    pub stage: Option<Stage>,

    /// Only albums by exactly this artist
    #[arg(long)]
    pub artist: Option<String>,

    /// Only albums carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Maximum number of albums printed (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run_list(workspace: &Workspace, args: ListArgs) -> Result<()> {
    let collection = workspace.store.load()?;
    let criteria = AlbumFilter {
        stage: args.stage,
        artist: args.artist,
        tag: args.tag,
    };
    let limit = args.limit.unwrap_or(workspace.config.list_limit);

    let matches = filter(&collection.albums, &criteria);
    if matches.is_empty() {
        if criteria.is_empty() {
            println!("{}", "No albums yet. Add one with 'albumd add'.".yellow());
        } else {
            println!("{}", "No albums match the filter.".yellow());
        }
        return Ok(());
    }

    for album in matches.iter().take(limit) {
        print_row(album);
    }
    if matches.len() > limit {
        println!(
            "{}",
            format!("   ... {} more (use --limit)", matches.len() - limit).dimmed()
        );
    }
    Ok(())
}

pub fn run_find(workspace: &Workspace, query: &str) -> Result<()> {
    let collection = workspace.store.load()?;
    let matches = search(&collection.albums, query);

    if matches.is_empty() {
        println!("{}", format!("No albums match '{}'", query).yellow());
        return Ok(());
    }
    for album in matches {
        print_row(album);
    }
    Ok(())
}

fn print_row(album: &Album) {
    println!("{:<50} {} {}", album.id(), album.stage().emoji(), album.stage());
}

pub fn run_stats(workspace: &Workspace, id: &str, as_json: bool) -> Result<()> {
    let stats = album_service::stats(&workspace.store, id)?;

    if as_json {
        let value = json!({
            "id": id,
            "average": stats.average,
            "top": stats.top,
            "low": stats.low,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let describe = |track: &Option<Track>| match track {
        Some(t) => format!(
            "{}. {} ({})",
            t.track_no,
            t.title,
            t.rating.map(|r| r.to_string()).unwrap_or_default()
        ),
        None => "-".to_string(),
    };

    println!("{}", format!("Stats for: {}", id).cyan().bold());
    println!(
        "   Average: {}",
        stats
            .average
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string())
    );
    println!("   Top:     {}", describe(&stats.top));
    println!("   Low:     {}", describe(&stats.low));
    Ok(())
}

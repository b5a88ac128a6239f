//! `export`

use super::Workspace;
use crate::export::{csv, render_caption, render_template, write_output, ExportFormat, JsonTemplate};
use crate::services::album_service;
use crate::store::CollectionStore;
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(long, value_enum)]
    pub format: ExportFormat,

    /// Album ID (required for json and md)
    #[arg(long)]
    pub id: Option<String>,

    /// Comma-separated CSV columns
    #[arg(long)]
    pub fields: Option<String>,

    /// JSON template
    #[arg(long, value_enum, default_value_t = JsonTemplate::Canva)]
    pub template: JsonTemplate,

    /// Output file
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(workspace: &Workspace, args: ExportArgs) -> Result<()> {
    let content = match args.format {
        ExportFormat::Csv => {
            let collection = workspace.store.load()?;
            let albums: Vec<_> = collection.albums.iter().collect();
            csv::render_csv(&albums, &csv::parse_fields(args.fields.as_deref()))?
        }
        ExportFormat::Json => {
            let album = album_service::get_album(&workspace.store, require_id(&args.id)?)?;
            let mut json = serde_json::to_string_pretty(&render_template(&album, args.template))?;
            json.push('\n');
            json
        }
        ExportFormat::Md => {
            let album = album_service::get_album(&workspace.store, require_id(&args.id)?)?;
            render_caption(&album)
        }
    };

    write_output(&args.out, &content)?;
    println!("{}", format!("✅ Exported {}", args.out.display()).green());
    Ok(())
}

fn require_id(id: &Option<String>) -> Result<&str> {
    id.as_deref()
        .ok_or_else(|| anyhow::anyhow!("--id is required for this export format"))
}

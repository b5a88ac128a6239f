//! Read-only renderers over finished album records
//!
//! - [`csv`]: one row per album, caller-selected columns
//! - [`templates`]: JSON overlays for the Canva and CapCut templates
//! - [`caption`]: Markdown post caption with genre hashtags

pub mod caption;
pub mod csv;
pub mod templates;

use crate::Result;
use anyhow::Context;
use clap::ValueEnum;
use std::path::Path;

pub use crate::models::validation::format_score;
pub use caption::render_caption;
pub use templates::{render_template, JsonTemplate};

/// Output format of the export command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Spreadsheet of all albums
    Csv,
    /// Overlay template data for one album
    Json,
    /// Caption text for one album
    Md,
}

/// Write rendered output, creating parent directories
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote export");
    Ok(())
}

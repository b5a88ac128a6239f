//! `snapshot`

use super::Workspace;
use crate::services::album_service;
use crate::Result;
use colored::Colorize;

pub fn run(workspace: &Workspace) -> Result<()> {
    let path = album_service::snapshot(&workspace.store)?;
    println!("{}", format!("📦 Snapshot written: {}", path.display()).green());
    Ok(())
}

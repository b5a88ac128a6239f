//! `init` and `check`

use super::Workspace;
use crate::services::album_service;
use crate::Result;
use colored::Colorize;

pub fn run(workspace: &Workspace, write_config: bool) -> Result<()> {
    let existed = workspace.store.exists();
    let collection = album_service::init(&workspace.store)?;

    if existed {
        println!(
            "{}",
            format!(
                "Collection already exists: {} ({} albums)",
                workspace.store.path().display(),
                collection.len()
            )
            .yellow()
        );
    } else {
        println!(
            "{}",
            format!("✅ Created {}", workspace.store.path().display()).green()
        );
    }

    if write_config {
        let path = workspace.config.save(&workspace.root)?;
        println!("   ✓ {}", path.display());
    }

    Ok(())
}

/// Print validation warnings; they never fail the command
pub fn run_check(workspace: &Workspace) -> Result<()> {
    let warnings = album_service::check(&workspace.store)?;

    if warnings.is_empty() {
        println!("{}", "ok".green());
        return Ok(());
    }

    for warning in &warnings {
        println!("{}", format!("⚠️  {}", warning).yellow());
    }
    println!();
    println!("{} warning(s)", warnings.len());
    Ok(())
}

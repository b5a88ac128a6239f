//! `set-stage` and `history`

use super::Workspace;
use crate::models::Stage;
use crate::services::album_service;
use crate::Result;
use colored::Colorize;

pub fn run(workspace: &Workspace, id: &str, to: Stage, note: Option<&str>, force: bool) -> Result<()> {
    let transition = album_service::set_stage(&workspace.store, id, to, note, force, workspace.actor())?;

    let from = transition
        .from_stage
        .map(|s| s.name())
        .unwrap_or("-");
    println!(
        "{} {} {} -> {} {}",
        "✅".green(),
        id,
        from,
        to.emoji(),
        to.name().green().bold()
    );
    if force {
        println!("{}", "   (forced)".dimmed());
    }
    Ok(())
}

pub fn run_history(workspace: &Workspace, id: &str) -> Result<()> {
    let album = album_service::get_album(&workspace.store, id)?;
    let status = album.status();

    println!("{}", format!("History for: {}", id).cyan().bold());
    println!("   Current: {} {}", status.stage().emoji(), status.stage());
    println!();

    if status.history().is_empty() {
        println!("{}", "   (no transitions)".dimmed());
        return Ok(());
    }

    for transition in status.history() {
        let from = transition
            .from_stage
            .map(|s| s.name())
            .unwrap_or("-");
        let note = if transition.note.is_empty() {
            String::new()
        } else {
            format!("  {}", transition.note.dimmed())
        };
        println!("   {}  {} -> {}{}", transition.at, from, transition.to_stage, note);
    }
    Ok(())
}

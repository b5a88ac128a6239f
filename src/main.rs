use albumd::cli::{self, Workspace};
use albumd::models::Stage;
use albumd::{Result, TrackerError};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "albumd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Album review production tracker", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Collection file (overrides db_path from the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (default: ./albumd.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the collection file if it does not exist
    Init {
        /// Also write albumd.toml with the current settings
        #[arg(long)]
        write_config: bool,
    },

    /// Report out-of-range scores and ratings
    Check,

    /// Add a new album
    Add(cli::album::AddArgs),

    /// Set one field of an album
    #[command(name = "set-field")]
    SetField {
        #[arg(long)]
        id: String,

        /// Field name (e.g. final_score, genre, links.youtube)
        #[arg(long)]
        field: String,

        /// New value; empty clears optional fields
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Append a track to an album
    #[command(name = "add-track")]
    AddTrack(cli::album::AddTrackArgs),

    /// Rate a track
    #[command(name = "set-track-rating")]
    SetTrackRating {
        #[arg(long)]
        id: String,

        #[arg(long)]
        track_no: u32,

        #[arg(long, allow_hyphen_values = true)]
        rating: f64,
    },

    /// Move an album to another production stage
    #[command(name = "set-stage")]
    SetStage {
        #[arg(long)]
        id: String,

        /// Target stage (e.g. SCRIPTED, graphics-ready)
        #[arg(long)]
        to: Stage,

        /// Note stored with the transition
        #[arg(long)]
        note: Option<String>,

        /// Skip the allowed-transition check
        #[arg(long)]
        force: bool,
    },

    /// Show the stage history of an album
    History {
        #[arg(long)]
        id: String,
    },

    /// List albums, optionally filtered
    List(cli::query::ListArgs),

    /// Search albums by artist or title
    Find {
        #[arg(long)]
        query: String,
    },

    /// Track rating statistics for an album
    Stats {
        #[arg(long)]
        id: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Remove an album
    Remove {
        #[arg(long)]
        id: String,
    },

    /// Export albums as CSV, template JSON, or a Markdown caption
    Export(cli::export::ExportArgs),

    /// Write a timestamped copy of the collection
    Snapshot,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        if e.downcast_ref::<TrackerError>().is_some_and(TrackerError::is_storage) {
            eprintln!("   Check the collection path (--db) or restore a file from the snapshots directory");
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "albumd=debug" } else { "albumd=warn" };
    let filter = if verbose {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "albumd", &mut io::stdout());
        return Ok(());
    }

    let workspace = Workspace::resolve(cli.config.as_deref(), cli.db.as_deref())?;

    match cli.command {
        Commands::Init { write_config } => cli::init::run(&workspace, write_config)?,
        Commands::Check => cli::init::run_check(&workspace)?,
        Commands::Add(args) => cli::album::run_add(&workspace, args)?,
        Commands::SetField { id, field, value } => {
            cli::album::run_set_field(&workspace, &id, &field, &value)?
        }
        Commands::AddTrack(args) => cli::album::run_add_track(&workspace, args)?,
        Commands::SetTrackRating { id, track_no, rating } => {
            cli::album::run_set_track_rating(&workspace, &id, track_no, rating)?
        }
        Commands::SetStage { id, to, note, force } => {
            cli::stage::run(&workspace, &id, to, note.as_deref(), force)?
        }
        Commands::History { id } => cli::stage::run_history(&workspace, &id)?,
        Commands::List(args) => cli::query::run_list(&workspace, args)?,
        Commands::Find { query } => cli::query::run_find(&workspace, &query)?,
        Commands::Stats { id, json } => cli::query::run_stats(&workspace, &id, json)?,
        Commands::Remove { id } => cli::album::run_remove(&workspace, &id)?,
        Commands::Export(args) => cli::export::run(&workspace, args)?,
        Commands::Snapshot => cli::snapshot::run(&workspace)?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

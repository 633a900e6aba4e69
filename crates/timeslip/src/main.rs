//! # Timeslip CLI (`tsl`)
//!
//! Browse and restore historical versions of text files, assembled from a
//! periodic backup store and the git commit log.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tsl log <file>` | Show the merged version timeline for a file |
//! | `tsl show <file> <id>` | Print the file's content at a snapshot |
//! | `tsl diff <file> <id>` | Diff a snapshot against the current content |
//! | `tsl restore <file> <id>` | Restore a snapshot (whole or one hunk) |
//! | `tsl backup <file>` | Record a backup of the current content |
//! | `tsl sources` | List history sources and their health |
//!
//! ## Examples
//!
//! ```bash
//! tsl backup notes/todo.md
//! tsl log notes/todo.md
//! tsl diff notes/todo.md git-3f2a9c1e
//! tsl restore notes/todo.md git-3f2a9c1e --hunk 0
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use timeslip::{backup_cmd, config, diff_cmd, restore_cmd, sources, timeline};

/// Timeslip — browse and restore historical versions of text files.
///
/// History comes from two sources: the local backup store and, inside a
/// git repository, the file's commit log. Both are read-only; only
/// `restore` writes, and only to the named file.
#[derive(Parser)]
#[command(
    name = "tsl",
    about = "Browse and restore historical versions of text files",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = "./timeslip.toml")]
    config: PathBuf,

    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged version timeline for a file.
    ///
    /// Backup snapshots and git commits are merged newest-first and
    /// deduplicated by content.
    Log {
        /// The file whose history to show.
        file: String,

        /// Print the timeline as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the file's full content at a snapshot.
    Show {
        /// The file whose history to read.
        file: String,

        /// Snapshot id (as printed by `tsl log`).
        id: String,
    },

    /// Show a unified diff from a snapshot to the current content.
    Diff {
        /// The file to diff.
        file: String,

        /// Snapshot id forming the old side of the diff.
        id: String,

        /// Diff against another snapshot instead of the current content.
        #[arg(long)]
        against: Option<String>,
    },

    /// Restore a snapshot, either verbatim or one hunk at a time.
    Restore {
        /// The file to restore.
        file: String,

        /// Snapshot id to restore from.
        id: String,

        /// Apply only this hunk (0-based) of the current→snapshot diff.
        #[arg(long)]
        hunk: Option<usize>,
    },

    /// Record a backup of the file's current content.
    Backup {
        /// The file to back up.
        file: String,
    },

    /// List history sources and their health.
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match config::load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Log { file, json } => timeline::run_log(&config, &file, json).await,
        Commands::Show { file, id } => timeline::run_show(&config, &file, &id).await,
        Commands::Diff { file, id, against } => {
            diff_cmd::run_diff(&config, &file, &id, against.as_deref()).await
        }
        Commands::Restore { file, id, hunk } => {
            restore_cmd::run_restore(&config, &file, &id, hunk).await
        }
        Commands::Backup { file } => backup_cmd::run_backup(&config, &file).await,
        Commands::Sources => sources::run_sources(&config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

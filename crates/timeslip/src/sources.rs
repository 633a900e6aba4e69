//! Source health and status listing.
//!
//! Reports whether each history source is configured and usable, so
//! callers can distinguish "no history exists" from "a source is disabled
//! or unhealthy". The aggregation pipeline itself returns an
//! undifferentiated empty timeline in all of those cases.

use serde::Serialize;

use timeslip_core::source::{BackupSource, VersionControlSource};

use crate::backup_store::FsBackupStore;
use crate::config::Config;
use crate::git_source::GitSource;

/// Health and configuration status of a single history source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    /// Source name: `"backup"` or `"git"`.
    pub name: String,
    /// Whether the source is enabled by configuration.
    pub configured: bool,
    /// Whether the source passes its health check.
    pub healthy: bool,
    /// Optional diagnostic notes.
    pub notes: Option<String>,
}

/// Probe both history sources.
pub async fn source_statuses(config: &Config) -> Vec<SourceStatus> {
    let mut statuses = Vec::new();

    let backup = FsBackupStore::new(&config.backup);
    statuses.push(SourceStatus {
        name: "backup".to_string(),
        configured: true,
        healthy: backup.is_available(),
        notes: Some(format!(
            "dir: {}, interval: {} min",
            config.backup.dir.display(),
            config.backup.interval_minutes
        )),
    });

    let work_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let git = GitSource::new(work_dir, &config.git);
    let healthy = config.git.enabled && git.is_available().await;
    statuses.push(SourceStatus {
        name: "git".to_string(),
        configured: config.git.enabled,
        healthy,
        notes: if config.git.enabled {
            Some(format!("max commits: {}", config.git.max_commits))
        } else {
            Some("disabled in config".to_string())
        },
    });

    statuses
}

/// CLI entry point for `tsl sources`.
pub async fn run_sources(config: &Config) -> anyhow::Result<()> {
    let statuses = source_statuses(config).await;

    println!("{:<8} {:<12} {:<10} NOTES", "SOURCE", "CONFIGURED", "HEALTHY");
    for status in &statuses {
        println!(
            "{:<8} {:<12} {:<10} {}",
            status.name,
            if status.configured { "yes" } else { "no" },
            if status.healthy { "ok" } else { "UNHEALTHY" },
            status.notes.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

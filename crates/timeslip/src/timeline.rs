//! Timeline retrieval: wires the configured adapters into the core
//! aggregation pipeline, and backs the `tsl log` / `tsl show` commands.

use anyhow::{bail, Result};
use serde::Serialize;

use timeslip_core::models::{Snapshot, SnapshotSource};
use timeslip_core::snapshot::format_snapshot_label;
use timeslip_core::timeline::{collect_timeline, TimelineOptions};

use crate::backup_store::FsBackupStore;
use crate::config::Config;
use crate::git_source::GitSource;

/// Fetch the merged, deduplicated timeline for one file.
///
/// This is the sole entry point frontends use to obtain a timeline. It
/// never fails: adapter errors degrade to an empty contribution from that
/// source.
pub async fn get_snapshots(config: &Config, file_path: &str) -> Vec<Snapshot> {
    let backup = FsBackupStore::new(&config.backup);
    let git = GitSource::new(work_dir(), &config.git);
    let options = TimelineOptions {
        version_control_enabled: config.git.enabled,
        max_commits: config.git.max_commits,
    };
    collect_timeline(&backup, &git, file_path, &options).await
}

/// Fetch the timeline and select one snapshot by id.
pub async fn find_snapshot(config: &Config, file_path: &str, id: &str) -> Result<Snapshot> {
    let snapshots = get_snapshots(config, file_path).await;
    match snapshots.into_iter().find(|s| s.id == id) {
        Some(snapshot) => Ok(snapshot),
        None => bail!("snapshot not found: {}", id),
    }
}

fn work_dir() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."))
}

/// One timeline row as printed by `tsl log --json`.
#[derive(Debug, Serialize)]
struct TimelineEntry<'a> {
    id: &'a str,
    ts: i64,
    source: SnapshotSource,
    label: String,
}

/// CLI entry point for `tsl log <file>`.
pub async fn run_log(config: &Config, file_path: &str, json: bool) -> Result<()> {
    let snapshots = get_snapshots(config, file_path).await;

    if json {
        let entries: Vec<TimelineEntry> = snapshots
            .iter()
            .map(|s| TimelineEntry {
                id: &s.id,
                ts: s.ts,
                source: s.source,
                label: format_snapshot_label(s),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if snapshots.is_empty() {
        println!("No history found for {file_path}.");
        println!("(Run `tsl sources` to check which history sources are active.)");
        return Ok(());
    }

    println!("Timeline for {file_path} ({} versions):", snapshots.len());
    for snapshot in &snapshots {
        let kind = match snapshot.source {
            SnapshotSource::Backup => "backup",
            SnapshotSource::VersionControl => "git   ",
        };
        println!(
            "  {:<24} {}  {}",
            snapshot.id,
            kind,
            format_snapshot_label(snapshot)
        );
    }
    Ok(())
}

/// CLI entry point for `tsl show <file> <snapshot-id>`.
pub async fn run_show(config: &Config, file_path: &str, id: &str) -> Result<()> {
    let snapshot = find_snapshot(config, file_path, id).await?;
    print!("{}", snapshot.data);
    if !snapshot.data.ends_with('\n') {
        println!();
    }
    Ok(())
}

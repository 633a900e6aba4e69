//! The `tsl diff` command: unified diff between a snapshot and the current
//! file content, or between two snapshots.

use anyhow::Result;

use timeslip_core::diff::compute_diff;
use timeslip_core::snapshot::format_snapshot_label;

use crate::config::Config;
use crate::document::FsDocument;
use crate::timeline::find_snapshot;

/// CLI entry point for `tsl diff <file> <snapshot-id> [--against <id>]`.
///
/// The snapshot is the old side; the current content (or the `--against`
/// snapshot) is the new side.
pub async fn run_diff(
    config: &Config,
    file_path: &str,
    id: &str,
    against: Option<&str>,
) -> Result<()> {
    let old = find_snapshot(config, file_path, id).await?;
    let old_label = format_snapshot_label(&old);

    let (new_data, new_label) = match against {
        Some(other_id) => {
            let other = find_snapshot(config, file_path, other_id).await?;
            let label = format_snapshot_label(&other);
            (other.data, label)
        }
        None => {
            let current = FsDocument::new(file_path).read().await?;
            (current, "current".to_string())
        }
    };

    let diff = compute_diff(&old.data, &new_data, &old_label, &new_label);
    if !diff.has_changes() {
        println!("No changes.");
        return Ok(());
    }
    print!("{}", diff.to_unified());
    Ok(())
}

//! The `tsl restore` command: full-version or single-hunk restore.

use anyhow::Result;

use timeslip_core::restore::{restore_full_version, restore_hunk};

use crate::config::Config;
use crate::document::FsDocument;
use crate::timeline::find_snapshot;

/// CLI entry point for `tsl restore <file> <snapshot-id> [--hunk <n>]`.
///
/// Without `--hunk`, overwrites the file with the snapshot content
/// verbatim. With `--hunk <n>`, applies only hunk `n` of the diff between
/// the current content and the snapshot content; an out-of-range index is
/// reported and exits non-zero without touching the file.
pub async fn run_restore(
    config: &Config,
    file_path: &str,
    id: &str,
    hunk: Option<usize>,
) -> Result<()> {
    let snapshot = find_snapshot(config, file_path, id).await?;
    let doc = FsDocument::new(file_path);

    match hunk {
        None => {
            restore_full_version(&doc, &snapshot.data).await?;
            println!("Restored {file_path} to {id}.");
        }
        Some(index) => {
            let current = doc.read().await?;
            let applied = restore_hunk(&doc, &current, &snapshot.data, index).await?;
            if !applied {
                eprintln!("Error: hunk index {index} out of range");
                std::process::exit(1);
            }
            println!("Applied hunk {index} of {id} to {file_path}.");
        }
    }
    Ok(())
}

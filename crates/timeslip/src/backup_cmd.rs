//! The `tsl backup` command: record a backup of the current content.

use anyhow::Result;

use crate::backup_store::FsBackupStore;
use crate::config::Config;
use crate::document::FsDocument;

/// CLI entry point for `tsl backup <file>`.
pub async fn run_backup(config: &Config, file_path: &str) -> Result<()> {
    let content = FsDocument::new(file_path).read().await?;
    let store = FsBackupStore::new(&config.backup);
    let record = store.record(file_path, &content).await?;
    println!(
        "Recorded backup fr-{} of {} ({} bytes).",
        record.ts,
        file_path,
        record.data.len()
    );
    Ok(())
}

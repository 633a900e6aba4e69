//! Filesystem backup store.
//!
//! Layout: one directory per file under the store root, named by a short
//! SHA-256 of the file's logical path, holding one JSON [`BackupRecord`]
//! per snapshot (`<ts>.json`):
//!
//! ```text
//! .timeslip/backups/
//!   3a1f0b92cd44/
//!     1700000000000.json
//!     1700000300000.json
//! ```
//!
//! Reads skip entries that fail to parse and drop records whose embedded
//! path does not match the queried one (short-hash collisions), so one
//! corrupt file never poisons the whole store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::debug;

use timeslip_core::models::BackupRecord;
use timeslip_core::source::BackupSource;

use crate::config::BackupConfig;

/// Backup store rooted at a local directory.
pub struct FsBackupStore {
    root: PathBuf,
    interval_minutes: u64,
}

impl FsBackupStore {
    pub fn new(config: &BackupConfig) -> Self {
        Self {
            root: config.dir.clone(),
            interval_minutes: config.interval_minutes,
        }
    }

    fn bucket_dir(&self, path: &str) -> PathBuf {
        self.root.join(short_hash(path))
    }

    /// Record a backup of `data` for `path`, stamped with the current
    /// time. If a record already exists at that millisecond, the stamp is
    /// bumped until the filename is free.
    pub async fn record(&self, path: &str, data: &str) -> Result<BackupRecord> {
        let dir = self.bucket_dir(path);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;

        let mut ts = Utc::now().timestamp_millis();
        let mut file = dir.join(format!("{ts}.json"));
        while tokio::fs::try_exists(&file).await? {
            ts += 1;
            file = dir.join(format!("{ts}.json"));
        }

        let record = BackupRecord {
            path: path.to_string(),
            ts,
            data: data.to_string(),
        };
        let json = serde_json::to_string(&record)?;
        tokio::fs::write(&file, json)
            .await
            .with_context(|| format!("Failed to write backup record: {}", file.display()))?;

        Ok(record)
    }
}

#[async_trait]
impl BackupSource for FsBackupStore {
    fn is_available(&self) -> bool {
        self.root.exists()
    }

    fn poll_interval_ms(&self) -> u64 {
        self.interval_minutes * 60 * 1000
    }

    async fn backups_for_file(&self, path: &str) -> Result<Vec<BackupRecord>> {
        let dir = self.bucket_dir(path);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("Failed to read backup directory: {}", dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let file = entry.path();
            if file.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_record(&file).await {
                Ok(record) if record.path == path => records.push(record),
                Ok(record) => {
                    debug!(file = %file.display(), path = %record.path, "path mismatch; skipped")
                }
                Err(err) => debug!(file = %file.display(), error = %err, "unreadable backup record; skipped"),
            }
        }

        records.sort_by(|a, b| b.ts.cmp(&a.ts));
        Ok(records)
    }
}

async fn read_record(file: &Path) -> Result<BackupRecord> {
    let content = tokio::fs::read_to_string(file).await?;
    Ok(serde_json::from_str(&content)?)
}

/// First 12 hex chars of SHA-256, used as a directory name.
fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())[..12].to_string()
}

//! History-source abstraction.
//!
//! The aggregation pipeline consumes history through two narrow capability
//! traits, enabling pluggable backends (filesystem backup store, a git
//! command-line adapter, in-memory fakes for tests).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//! Every trait call is a potential suspension point: adapters may perform
//! long-latency I/O (reading stores, spawning external processes) and are
//! expected to bound it themselves (timeouts, output caps).

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{BackupRecord, CommitInfo};

/// A source of periodic raw-content backups, keyed by file path.
#[async_trait]
pub trait BackupSource: Send + Sync {
    /// Whether the backup store is present and usable.
    fn is_available(&self) -> bool;

    /// The store's snapshot interval in milliseconds. Informational,
    /// intended for caller-side pollers; the aggregation pipeline never
    /// reads it.
    fn poll_interval_ms(&self) -> u64;

    /// All backup records for a file, in any order; may be empty.
    async fn backups_for_file(&self, path: &str) -> Result<Vec<BackupRecord>>;
}

/// A source of commit-based history derived from a version-control system.
#[async_trait]
pub trait VersionControlSource: Send + Sync {
    /// Whether version control can work here at all (binary present,
    /// working directory inside a repository).
    async fn is_available(&self) -> bool;

    /// Whether the file is tracked. Failures read as `false`.
    async fn is_file_tracked(&self, path: &str) -> bool;

    /// Up to `limit` commits touching the file, newest-first, following
    /// renames.
    async fn commits_for_file(&self, path: &str, limit: usize) -> Result<Vec<CommitInfo>>;

    /// The file's full content at a commit, or `Ok(None)` when the file
    /// did not exist there (or the content cannot be retrieved).
    async fn file_at_commit(&self, hash: &str, path: &str) -> Result<Option<String>>;
}

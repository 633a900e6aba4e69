//! In-memory history sources for testing.
//!
//! Configurable fakes for both traits: records are supplied up front, and
//! failure modes (unavailable store, failing fetch, untracked file,
//! missing or erroring commit content) can be switched on per test.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::{BackupRecord, CommitInfo};

use super::{BackupSource, VersionControlSource};

/// Fake backup store backed by a `Vec<BackupRecord>`.
pub struct InMemoryBackupSource {
    records: Vec<BackupRecord>,
    available: bool,
    failing: bool,
}

impl InMemoryBackupSource {
    pub fn new(records: Vec<BackupRecord>) -> Self {
        Self {
            records,
            available: true,
            failing: false,
        }
    }

    /// A store that reports itself unavailable and holds no records.
    pub fn unavailable() -> Self {
        Self {
            records: Vec::new(),
            available: false,
            failing: false,
        }
    }

    /// A store whose fetch always errors.
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            available: true,
            failing: true,
        }
    }
}

#[async_trait]
impl BackupSource for InMemoryBackupSource {
    fn is_available(&self) -> bool {
        self.available
    }

    fn poll_interval_ms(&self) -> u64 {
        5 * 60 * 1000
    }

    async fn backups_for_file(&self, path: &str) -> Result<Vec<BackupRecord>> {
        if self.failing {
            bail!("backup store fetch failed");
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect())
    }
}

/// Fake version-control source with a fixed commit log and a hash →
/// content map.
pub struct InMemoryVersionControlSource {
    commits: Vec<CommitInfo>,
    contents: HashMap<String, String>,
    content_errors: HashSet<String>,
    available: bool,
    tracked: bool,
    failing: bool,
}

impl InMemoryVersionControlSource {
    /// `contents` maps commit hashes to file content at that commit;
    /// commits without an entry behave like the file not existing there.
    pub fn new(commits: Vec<CommitInfo>, contents: HashMap<String, String>) -> Self {
        Self {
            commits,
            contents,
            content_errors: HashSet::new(),
            available: true,
            tracked: true,
            failing: false,
        }
    }

    /// Make the content fetch for one commit hash error instead of
    /// returning content.
    pub fn with_failing_content(mut self, hash: &str) -> Self {
        self.content_errors.insert(hash.to_string());
        self
    }

    pub fn unavailable() -> Self {
        Self {
            commits: Vec::new(),
            contents: HashMap::new(),
            content_errors: HashSet::new(),
            available: false,
            tracked: false,
            failing: false,
        }
    }

    pub fn untracked() -> Self {
        let mut source = Self::new(Vec::new(), HashMap::new());
        source.tracked = false;
        source
    }

    /// A source whose log fetch always errors.
    pub fn failing() -> Self {
        let mut source = Self::new(Vec::new(), HashMap::new());
        source.failing = true;
        source
    }
}

#[async_trait]
impl VersionControlSource for InMemoryVersionControlSource {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn is_file_tracked(&self, _path: &str) -> bool {
        self.tracked
    }

    async fn commits_for_file(&self, _path: &str, limit: usize) -> Result<Vec<CommitInfo>> {
        if self.failing {
            bail!("version-control log fetch failed");
        }
        Ok(self.commits.iter().take(limit).cloned().collect())
    }

    async fn file_at_commit(&self, hash: &str, _path: &str) -> Result<Option<String>> {
        if self.content_errors.contains(hash) {
            bail!("content fetch failed for {hash}");
        }
        Ok(self.contents.get(hash).cloned())
    }
}

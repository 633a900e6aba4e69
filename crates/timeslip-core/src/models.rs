//! Core data types: `Snapshot`, source records, and diff structures.
//!
//! A [`Snapshot`] is the unified historical-version record that both
//! history sources normalize into. Snapshots are value types: they are
//! built fresh on every aggregation call, never mutated afterwards, and
//! never persisted.

use serde::{Deserialize, Serialize};

/// Which history source a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotSource {
    /// The periodic raw-content backup store.
    Backup,
    /// The version-control commit log.
    VersionControl,
}

/// Source-specific snapshot metadata, tagged by source.
///
/// Modeled as a closed sum type so every consumer must handle both
/// variants explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum SnapshotMetadata {
    /// Backup-store snapshots carry no extra metadata.
    Backup,
    /// Version-control snapshots carry the commit identity.
    VersionControl {
        commit_hash: String,
        short_hash: String,
        commit_message: String,
        author_name: String,
    },
}

/// A unified historical version of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unique within a file's merged timeline: `"fr-<ts>"` for backup
    /// snapshots, `"git-<hash>"` for version-control snapshots.
    /// Deterministic across re-fetches.
    pub id: String,
    /// Logical file path at the time of the snapshot.
    pub path: String,
    /// Snapshot time as epoch milliseconds.
    pub ts: i64,
    /// Full file content at that point in time — never a delta.
    pub data: String,
    /// Which source produced this snapshot.
    pub source: SnapshotSource,
    /// Source-specific metadata; its variant always matches `source`.
    pub metadata: SnapshotMetadata,
}

/// A raw record from the backup store: full content keyed by path and
/// timestamp (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub path: String,
    pub ts: i64,
    pub data: String,
}

/// A raw commit record from the version-control log, newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    pub short_hash: String,
    pub author_name: String,
    /// Author date as Unix seconds (scaled to milliseconds during
    /// normalization).
    pub author_date_unix: i64,
    pub subject: String,
}

/// One contiguous block of a structured diff, padded with context lines.
///
/// `old_start`/`new_start` are 1-based, matching conventional unified-diff
/// numbering. Each entry of `lines` is prefixed with `' '` (context),
/// `'-'` (only in old), or `'+'` (only in new), with no trailing newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub lines: Vec<String>,
}

/// A structured line-level diff between two text blobs.
///
/// Zero hunks means the two inputs are textually identical. The headers
/// are opaque display labels and never participate in comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub old_header: String,
    pub new_header: String,
    pub hunks: Vec<DiffHunk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serializes_with_source_tag() {
        let meta = SnapshotMetadata::Backup;
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "source": "backup" }));

        let meta = SnapshotMetadata::VersionControl {
            commit_hash: "abc123".to_string(),
            short_hash: "abc".to_string(),
            commit_message: "Fix heading".to_string(),
            author_name: "Alice".to_string(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["source"], "version-control");
        assert_eq!(json["commit_hash"], "abc123");
    }

    #[test]
    fn test_source_round_trips() {
        for source in [SnapshotSource::Backup, SnapshotSource::VersionControl] {
            let json = serde_json::to_string(&source).unwrap();
            let back: SnapshotSource = serde_json::from_str(&json).unwrap();
            assert_eq!(back, source);
        }
    }
}

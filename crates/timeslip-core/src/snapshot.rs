//! Snapshot normalization, merging, sorting, and content deduplication.
//!
//! Both history sources produce source-specific records which are
//! normalized into [`Snapshot`]s here, then flattened into one
//! chronological timeline: merge → sort newest-first → dedup by content.
//!
//! All functions are pure and non-mutating of their inputs.

use std::collections::HashSet;

use chrono::DateTime;

use crate::models::{BackupRecord, CommitInfo, Snapshot, SnapshotMetadata, SnapshotSource};

/// Normalize a raw backup-store record into a [`Snapshot`].
///
/// The id is `"fr-<ts>"`, deterministic across re-fetches.
pub fn backup_to_snapshot(record: BackupRecord) -> Snapshot {
    Snapshot {
        id: format!("fr-{}", record.ts),
        path: record.path,
        ts: record.ts,
        data: record.data,
        source: SnapshotSource::Backup,
        metadata: SnapshotMetadata::Backup,
    }
}

/// Normalize a version-control commit into a [`Snapshot`].
///
/// The id is `"git-<hash>"`; the commit's author date (Unix seconds) is
/// scaled to epoch milliseconds.
pub fn commit_to_snapshot(path: &str, data: String, commit: &CommitInfo) -> Snapshot {
    Snapshot {
        id: format!("git-{}", commit.hash),
        path: path.to_string(),
        ts: commit.author_date_unix * 1000,
        data,
        source: SnapshotSource::VersionControl,
        metadata: SnapshotMetadata::VersionControl {
            commit_hash: commit.hash.clone(),
            short_hash: commit.short_hash.clone(),
            commit_message: commit.subject.clone(),
            author_name: commit.author_name.clone(),
        },
    }
}

/// Flatten snapshot lists from multiple sources into one, sorted
/// newest-first. Ordering among equal timestamps follows the stable sort
/// and is not contractually defined.
pub fn merge_snapshots(sources: Vec<Vec<Snapshot>>) -> Vec<Snapshot> {
    let all: Vec<Snapshot> = sources.into_iter().flatten().collect();
    sort_snapshots_by_date(&all)
}

/// Return a new sequence sorted descending by `ts`. The input is left
/// untouched; input order is preserved on ties (stable sort).
pub fn sort_snapshots_by_date(snapshots: &[Snapshot]) -> Vec<Snapshot> {
    let mut sorted = snapshots.to_vec();
    sorted.sort_by(|a, b| b.ts.cmp(&a.ts));
    sorted
}

/// Drop snapshots whose `data` is byte-for-byte equal to one already seen.
///
/// The input must already be sorted newest-first; a single pass keeps the
/// first (newest) occurrence of each distinct content value. Dedup is by
/// content identity regardless of source, so a commit and a backup with
/// identical content collapse into the newer entry.
pub fn deduplicate_snapshots(snapshots: Vec<Snapshot>) -> Vec<Snapshot> {
    let mut seen: HashSet<String> = HashSet::new();
    snapshots
        .into_iter()
        .filter(|snapshot| seen.insert(snapshot.data.clone()))
        .collect()
}

/// Human-readable label for a snapshot.
///
/// Version-control: `"<short_hash>: <commit_message>"`.
/// Backup: `"Snapshot (YYYY-MM-DD HH:MM)"` in UTC.
pub fn format_snapshot_label(snapshot: &Snapshot) -> String {
    match &snapshot.metadata {
        SnapshotMetadata::VersionControl {
            short_hash,
            commit_message,
            ..
        } => format!("{short_hash}: {commit_message}"),
        SnapshotMetadata::Backup => {
            let date = DateTime::from_timestamp_millis(snapshot.ts)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| snapshot.ts.to_string());
            format!("Snapshot ({date})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backup(ts: i64, data: &str) -> Snapshot {
        backup_to_snapshot(BackupRecord {
            path: "notes/test.md".to_string(),
            ts,
            data: data.to_string(),
        })
    }

    fn commit(hash: &str, ts_seconds: i64, data: &str) -> Snapshot {
        commit_to_snapshot(
            "notes/test.md",
            data.to_string(),
            &CommitInfo {
                hash: hash.to_string(),
                short_hash: hash.chars().take(7).collect(),
                author_name: "Alice".to_string(),
                author_date_unix: ts_seconds,
                subject: "Fix heading".to_string(),
            },
        )
    }

    #[test]
    fn test_backup_to_snapshot() {
        let snapshot = backup(1_700_000_000_000, "file content");
        assert_eq!(snapshot.id, "fr-1700000000000");
        assert_eq!(snapshot.path, "notes/test.md");
        assert_eq!(snapshot.ts, 1_700_000_000_000);
        assert_eq!(snapshot.data, "file content");
        assert_eq!(snapshot.source, SnapshotSource::Backup);
        assert_eq!(snapshot.metadata, SnapshotMetadata::Backup);
    }

    #[test]
    fn test_commit_to_snapshot_scales_seconds_to_millis() {
        let snapshot = commit("abc1234567890", 1_700_000_000, "git content");
        assert_eq!(snapshot.id, "git-abc1234567890");
        assert_eq!(snapshot.ts, 1_700_000_000_000);
        assert_eq!(snapshot.source, SnapshotSource::VersionControl);
        assert_eq!(
            snapshot.metadata,
            SnapshotMetadata::VersionControl {
                commit_hash: "abc1234567890".to_string(),
                short_hash: "abc1234".to_string(),
                commit_message: "Fix heading".to_string(),
                author_name: "Alice".to_string(),
            }
        );
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let merged = merge_snapshots(vec![
            vec![backup(3000, "v3"), backup(1000, "v1")],
            vec![commit("h2", 2, "g2"), commit("h4", 4, "g4")],
        ]);

        let ts: Vec<i64> = merged.iter().map(|s| s.ts).collect();
        assert_eq!(ts, vec![4000, 3000, 2000, 1000]);
    }

    #[test]
    fn test_merge_empty_sources() {
        assert!(merge_snapshots(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_sort_does_not_mutate_and_is_idempotent() {
        let original = vec![backup(1000, ""), backup(3000, ""), backup(2000, "")];
        let sorted = sort_snapshots_by_date(&original);

        assert_eq!(original[0].ts, 1000);
        let ts: Vec<i64> = sorted.iter().map(|s| s.ts).collect();
        assert_eq!(ts, vec![3000, 2000, 1000]);

        assert_eq!(sort_snapshots_by_date(&sorted), sorted);
    }

    #[test]
    fn test_dedup_keeps_newest_per_content() {
        let deduped = deduplicate_snapshots(vec![
            backup(3000, "same content"),
            commit("h2", 2, "same content"),
            backup(1000, "same content"),
        ]);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].ts, 3000);
    }

    #[test]
    fn test_dedup_across_sources() {
        let deduped = deduplicate_snapshots(vec![
            commit("h1", 4, "shared"),
            backup(3000, "shared"),
            backup(2000, "unique"),
            commit("h2", 1, "unique"),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].ts, 4000);
        assert_eq!(deduped[1].ts, 2000);
    }

    #[test]
    fn test_dedup_keeps_distinct_content() {
        let deduped = deduplicate_snapshots(vec![
            backup(3000, "content A"),
            backup(2000, "content B"),
            backup(1000, "content C"),
        ]);
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn test_dedup_empty_input() {
        assert!(deduplicate_snapshots(Vec::new()).is_empty());
    }

    #[test]
    fn test_label_for_commit() {
        let snapshot = commit("abc1234567890", 1_700_000_000, "");
        assert_eq!(format_snapshot_label(&snapshot), "abc1234: Fix heading");
    }

    #[test]
    fn test_label_for_backup() {
        let snapshot = backup(1_700_000_000_000, "");
        let label = format_snapshot_label(&snapshot);
        assert!(label.starts_with("Snapshot ("), "unexpected label: {label}");
        assert!(label.contains("2023-11-14"));
    }
}

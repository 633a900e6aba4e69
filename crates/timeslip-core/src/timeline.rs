//! Aggregation orchestrator: one merged timeline per file.
//!
//! Queries both history sources, normalizes their records into
//! [`Snapshot`]s, then merges, sorts newest-first, and deduplicates by
//! content. The two sources fail independently: an adapter error is
//! logged and contributes an empty list, never an error to the caller —
//! worst case the result is empty.
//!
//! The final ordering is imposed here by the merge/sort step, regardless
//! of the order in which the sources' async operations complete.

use tracing::{debug, warn};

use crate::models::Snapshot;
use crate::snapshot::{
    backup_to_snapshot, commit_to_snapshot, deduplicate_snapshots, merge_snapshots,
};
use crate::source::{BackupSource, VersionControlSource};

/// Aggregation settings supplied by the caller.
#[derive(Debug, Clone)]
pub struct TimelineOptions {
    /// Whether the version-control source is queried at all.
    pub version_control_enabled: bool,
    /// Maximum number of commits to retrieve per file.
    pub max_commits: usize,
}

/// Build the merged, deduplicated timeline for one file.
///
/// This is the sole aggregation entry point; all frontends delegate to it.
pub async fn collect_timeline<B, V>(
    backup: &B,
    vcs: &V,
    path: &str,
    options: &TimelineOptions,
) -> Vec<Snapshot>
where
    B: BackupSource + ?Sized,
    V: VersionControlSource + ?Sized,
{
    let mut sources: Vec<Vec<Snapshot>> = Vec::new();

    sources.push(backup_snapshots(backup, path).await);

    if options.version_control_enabled {
        sources.push(vcs_snapshots(vcs, path, options.max_commits).await);
    }

    deduplicate_snapshots(merge_snapshots(sources))
}

async fn backup_snapshots<B: BackupSource + ?Sized>(backup: &B, path: &str) -> Vec<Snapshot> {
    match backup.backups_for_file(path).await {
        Ok(records) => records.into_iter().map(backup_to_snapshot).collect(),
        Err(err) => {
            warn!(path, error = %err, "backup source failed; continuing without it");
            Vec::new()
        }
    }
}

async fn vcs_snapshots<V: VersionControlSource + ?Sized>(
    vcs: &V,
    path: &str,
    max_commits: usize,
) -> Vec<Snapshot> {
    if !vcs.is_available().await {
        debug!(path, "version-control source not available");
        return Vec::new();
    }
    if !vcs.is_file_tracked(path).await {
        debug!(path, "file not tracked by version control");
        return Vec::new();
    }

    let commits = match vcs.commits_for_file(path, max_commits).await {
        Ok(commits) => commits,
        Err(err) => {
            warn!(path, error = %err, "version-control source failed; continuing without it");
            return Vec::new();
        }
    };

    let mut snapshots = Vec::with_capacity(commits.len());
    for commit in &commits {
        // A commit whose content cannot be retrieved is skipped, not an
        // error for the whole batch.
        match vcs.file_at_commit(&commit.hash, path).await {
            Ok(Some(content)) => snapshots.push(commit_to_snapshot(path, content, commit)),
            Ok(None) => debug!(path, hash = %commit.hash, "file absent at commit; skipped"),
            Err(err) => {
                debug!(path, hash = %commit.hash, error = %err, "content fetch failed; skipped")
            }
        }
    }
    snapshots
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::{BackupRecord, CommitInfo, SnapshotSource};
    use crate::source::memory::{InMemoryBackupSource, InMemoryVersionControlSource};

    const PATH: &str = "notes/test.md";

    fn options(enabled: bool) -> TimelineOptions {
        TimelineOptions {
            version_control_enabled: enabled,
            max_commits: 50,
        }
    }

    fn record(ts: i64, data: &str) -> BackupRecord {
        BackupRecord {
            path: PATH.to_string(),
            ts,
            data: data.to_string(),
        }
    }

    fn commit(hash: &str, ts_seconds: i64) -> CommitInfo {
        CommitInfo {
            hash: hash.to_string(),
            short_hash: hash.chars().take(7).collect(),
            author_name: "Alice".to_string(),
            author_date_unix: ts_seconds,
            subject: format!("commit {hash}"),
        }
    }

    #[tokio::test]
    async fn test_backup_only_when_vcs_disabled() {
        let backup = InMemoryBackupSource::new(vec![record(2000, "v2"), record(1000, "v1")]);
        let vcs = InMemoryVersionControlSource::unavailable();

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(false)).await;

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].ts, 2000);
        assert_eq!(timeline[1].ts, 1000);
        assert!(timeline.iter().all(|s| s.source == SnapshotSource::Backup));
    }

    #[tokio::test]
    async fn test_merges_both_sources_newest_first() {
        let backup = InMemoryBackupSource::new(vec![record(3000, "fr-v3")]);
        let vcs = InMemoryVersionControlSource::new(
            vec![commit("abc", 4), commit("def", 1)],
            HashMap::from([
                ("abc".to_string(), "git-newest".to_string()),
                ("def".to_string(), "git-oldest".to_string()),
            ]),
        );

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;

        let ts_data: Vec<(i64, &str)> = timeline.iter().map(|s| (s.ts, s.data.as_str())).collect();
        assert_eq!(
            ts_data,
            vec![(4000, "git-newest"), (3000, "fr-v3"), (1000, "git-oldest")]
        );
    }

    #[tokio::test]
    async fn test_deduplicates_across_sources() {
        let backup = InMemoryBackupSource::new(vec![record(3000, "shared")]);
        let vcs = InMemoryVersionControlSource::new(
            vec![commit("abc", 4)],
            HashMap::from([("abc".to_string(), "shared".to_string())]),
        );

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].ts, 4000);
        assert_eq!(timeline[0].source, SnapshotSource::VersionControl);
    }

    #[tokio::test]
    async fn test_backup_failure_does_not_suppress_vcs() {
        let backup = InMemoryBackupSource::failing();
        let vcs = InMemoryVersionControlSource::new(
            vec![commit("abc", 4)],
            HashMap::from([("abc".to_string(), "content".to_string())]),
        );

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].id, "git-abc");
    }

    #[tokio::test]
    async fn test_vcs_failure_does_not_suppress_backups() {
        let backup = InMemoryBackupSource::new(vec![record(1000, "v1")]);
        let vcs = InMemoryVersionControlSource::failing();

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].id, "fr-1000");
    }

    #[tokio::test]
    async fn test_both_sources_failing_yields_empty() {
        let backup = InMemoryBackupSource::failing();
        let vcs = InMemoryVersionControlSource::failing();

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;
        assert!(timeline.is_empty());
    }

    #[tokio::test]
    async fn test_untracked_file_contributes_nothing() {
        let backup = InMemoryBackupSource::new(vec![record(1000, "v1")]);
        let vcs = InMemoryVersionControlSource::untracked();

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].source, SnapshotSource::Backup);
    }

    #[tokio::test]
    async fn test_commit_without_content_is_skipped() {
        let backup = InMemoryBackupSource::new(Vec::new());
        let vcs = InMemoryVersionControlSource::new(
            vec![commit("abc", 4), commit("def", 2)],
            HashMap::from([("abc".to_string(), "content".to_string())]),
        );

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].id, "git-abc");
    }

    #[tokio::test]
    async fn test_commit_with_erroring_content_is_skipped() {
        let backup = InMemoryBackupSource::new(Vec::new());
        let vcs = InMemoryVersionControlSource::new(
            vec![commit("abc", 6), commit("def", 4), commit("ghi", 2)],
            HashMap::from([
                ("abc".to_string(), "newest".to_string()),
                ("def".to_string(), "broken".to_string()),
                ("ghi".to_string(), "oldest".to_string()),
            ]),
        )
        .with_failing_content("def");

        let timeline = collect_timeline(&backup, &vcs, PATH, &options(true)).await;

        let ids: Vec<&str> = timeline.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["git-abc", "git-ghi"]);
    }

    #[tokio::test]
    async fn test_max_commits_limits_history() {
        let commits: Vec<CommitInfo> = (1..=10).map(|i| commit(&format!("h{i}"), i)).collect();
        let contents: HashMap<String, String> = (1..=10)
            .map(|i| (format!("h{i}"), format!("content {i}")))
            .collect();
        let backup = InMemoryBackupSource::new(Vec::new());
        let vcs = InMemoryVersionControlSource::new(commits, contents);

        let opts = TimelineOptions {
            version_control_enabled: true,
            max_commits: 3,
        };
        let timeline = collect_timeline(&backup, &vcs, PATH, &opts).await;
        assert_eq!(timeline.len(), 3);
    }
}

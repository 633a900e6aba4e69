//! Git history source.
//!
//! Implements [`VersionControlSource`] by spawning the `git` binary in the
//! working directory. Every invocation is bounded by a timeout and an
//! output-size cap; a command that fails, times out, or overflows is an
//! error for that call only — the aggregation layer degrades to the other
//! source.
//!
//! The working directory may be a subdirectory of the repository: file
//! paths are translated to repo-relative paths via
//! `git rev-parse --show-toplevel` before being handed to git.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use timeslip_core::models::CommitInfo;
use timeslip_core::source::VersionControlSource;

use crate::config::GitConfig;

/// Fields per commit in the `git log` format string below.
const LOG_FIELDS_PER_COMMIT: usize = 5;

/// One `%H`/`%h`/`%an`/`%at`/`%s` field per line.
const LOG_FORMAT: &str = "%H%n%h%n%an%n%at%n%s";

/// Version-control source backed by the `git` command-line tool.
pub struct GitSource {
    work_dir: PathBuf,
    timeout: Duration,
    max_output_bytes: usize,
}

impl GitSource {
    pub fn new(work_dir: PathBuf, config: &GitConfig) -> Self {
        Self {
            work_dir,
            timeout: Duration::from_secs(config.timeout_secs),
            max_output_bytes: config.max_output_bytes,
        }
    }

    /// Run `git <args>` in the working directory and return stdout.
    async fn exec(&self, args: &[&str]) -> Result<String> {
        let subcommand = args.first().copied().unwrap_or("");

        let output = tokio::time::timeout(
            self.timeout,
            Command::new("git")
                .args(args)
                .current_dir(&self.work_dir)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| anyhow::anyhow!("git {subcommand} timed out after {:?}", self.timeout))?
        .with_context(|| format!("Failed to execute 'git {subcommand}'. Is git installed?"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {subcommand} failed: {}", stderr.trim());
        }
        // The cap is checked after the command completes: `output()`
        // buffers stdout in full, so an oversized result is rejected
        // rather than truncated mid-stream. A runaway command is bounded
        // by the timeout above.
        if output.stdout.len() > self.max_output_bytes {
            bail!(
                "git {subcommand} output exceeded {} bytes",
                self.max_output_bytes
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Translate a working-directory-relative path into a repo-relative
    /// one. The two coincide when the working directory is the repo root.
    async fn repo_relative_path(&self, path: &str) -> Result<String> {
        let top_level = self.exec(&["rev-parse", "--show-toplevel"]).await?;
        let top_level = tokio::fs::canonicalize(top_level.trim())
            .await
            .with_context(|| "Failed to resolve repository top level")?;
        let base = tokio::fs::canonicalize(&self.work_dir)
            .await
            .with_context(|| "Failed to resolve working directory")?;

        match base.strip_prefix(&top_level) {
            Ok(rel) if rel.as_os_str().is_empty() => Ok(path.to_string()),
            Ok(rel) => Ok(format!("{}/{}", rel.to_string_lossy().replace('\\', "/"), path)),
            Err(_) => Ok(path.to_string()),
        }
    }
}

#[async_trait]
impl VersionControlSource for GitSource {
    async fn is_available(&self) -> bool {
        match self.exec(&["rev-parse", "--is-inside-work-tree"]).await {
            Ok(out) => out.trim() == "true",
            Err(err) => {
                debug!(error = %err, "git availability check failed");
                false
            }
        }
    }

    async fn is_file_tracked(&self, path: &str) -> bool {
        let Ok(rel) = self.repo_relative_path(path).await else {
            return false;
        };
        self.exec(&["ls-files", "--error-unmatch", "--", &rel])
            .await
            .is_ok()
    }

    async fn commits_for_file(&self, path: &str, limit: usize) -> Result<Vec<CommitInfo>> {
        let rel = self.repo_relative_path(path).await?;
        let limit = limit.to_string();
        let format = format!("--format={LOG_FORMAT}");
        let output = self
            .exec(&["log", "--follow", &format, "-n", &limit, "--", &rel])
            .await?;
        Ok(parse_commit_log(&output))
    }

    async fn file_at_commit(&self, hash: &str, path: &str) -> Result<Option<String>> {
        let rel = self.repo_relative_path(path).await?;
        let spec = format!("{hash}:{rel}");
        match self.exec(&["show", &spec]).await {
            Ok(content) => Ok(Some(content)),
            Err(err) => {
                // The file usually just did not exist at that commit.
                debug!(hash, path, error = %err, "git show failed");
                Ok(None)
            }
        }
    }
}

/// Parse `git log --format=%H%n%h%n%an%n%at%n%s` output: five lines per
/// commit. Malformed or truncated entries are dropped.
fn parse_commit_log(output: &str) -> Vec<CommitInfo> {
    let lines: Vec<&str> = output.trim().split('\n').collect();
    let mut commits = Vec::new();

    let mut i = 0;
    while i + LOG_FIELDS_PER_COMMIT <= lines.len() {
        let hash = lines[i];
        let short_hash = lines[i + 1];
        let author_name = lines[i + 2];
        let date = lines[i + 3];
        let subject = lines[i + 4];
        i += LOG_FIELDS_PER_COMMIT;

        if hash.is_empty() || short_hash.is_empty() {
            continue;
        }
        let Ok(author_date_unix) = date.parse::<i64>() else {
            continue;
        };

        commits.push(CommitInfo {
            hash: hash.to_string(),
            short_hash: short_hash.to_string(),
            author_name: author_name.to_string(),
            author_date_unix,
            subject: subject.to_string(),
        });
    }

    commits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commit_log() {
        let output = "abc123\nabc\nAlice\n1700000000\nFix heading\n\
                      def456\ndef\nBob\n1690000000\nInitial commit\n";
        let commits = parse_commit_log(output);

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "abc123");
        assert_eq!(commits[0].short_hash, "abc");
        assert_eq!(commits[0].author_name, "Alice");
        assert_eq!(commits[0].author_date_unix, 1_700_000_000);
        assert_eq!(commits[0].subject, "Fix heading");
        assert_eq!(commits[1].hash, "def456");
    }

    #[test]
    fn test_parse_commit_log_skips_malformed_date() {
        let output = "abc123\nabc\nAlice\nnot-a-date\nFix heading\n\
                      def456\ndef\nBob\n1690000000\nok\n";
        let commits = parse_commit_log(output);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, "def456");
    }

    #[test]
    fn test_parse_commit_log_ignores_trailing_partial_record() {
        let output = "abc123\nabc\nAlice\n1700000000\nFix heading\ndef456\ndef\n";
        let commits = parse_commit_log(output);
        assert_eq!(commits.len(), 1);
    }

    #[test]
    fn test_parse_commit_log_empty_output() {
        assert!(parse_commit_log("").is_empty());
        assert!(parse_commit_log("\n").is_empty());
    }
}

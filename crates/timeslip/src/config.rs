//! TOML configuration parsing and validation.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Practical upper bound for `git.max_commits`.
const MAX_COMMITS_LIMIT: usize = 200;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub git: GitConfig,
}

/// Settings for the filesystem backup store.
#[derive(Debug, Deserialize, Clone)]
pub struct BackupConfig {
    /// Root directory of the backup store.
    #[serde(default = "default_backup_dir")]
    pub dir: PathBuf,
    /// Snapshot interval in minutes (informational, for pollers).
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: default_backup_dir(),
            interval_minutes: default_interval_minutes(),
        }
    }
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(".timeslip/backups")
}

fn default_interval_minutes() -> u64 {
    5
}

/// Settings for the git history source.
#[derive(Debug, Deserialize, Clone)]
pub struct GitConfig {
    /// Whether git commits appear on the timeline at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum commits fetched per file (1–200).
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,
    /// Timeout for a single git invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum accepted git stdout size, in bytes.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_commits: default_max_commits(),
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_commits() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_output_bytes() -> usize {
    10 * 1024 * 1024
}

/// Load and validate a config file. A missing file yields the built-in
/// defaults; an unreadable or invalid one is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.git.max_commits == 0 || config.git.max_commits > MAX_COMMITS_LIMIT {
        anyhow::bail!(
            "git.max_commits must be between 1 and {} (got {})",
            MAX_COMMITS_LIMIT,
            config.git.max_commits
        );
    }

    if config.git.timeout_secs == 0 {
        anyhow::bail!("git.timeout_secs must be > 0");
    }

    if config.backup.interval_minutes == 0 {
        anyhow::bail!("backup.interval_minutes must be > 0");
    }

    Ok(config)
}

//! # Timeslip
//!
//! **Browse and restore historical versions of text files.**
//!
//! Version history is assembled on demand from two independent sources: a
//! periodic raw-content backup store and the git commit log. The two
//! records are merged into one chronological, content-deduplicated
//! timeline; any point on it can be diffed against the current content and
//! restored, either whole or one hunk at a time.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ FsBackupStore │   │  GitSource   │      adapters (this crate)
//! └──────┬───────┘   └──────┬───────┘
//!        ▼                  ▼
//!   normalize → merge → sort → dedup        timeslip-core::timeline
//!                   │
//!            ┌──────┴──────┐
//!            ▼             ▼
//!       compute_diff   restore engine       timeslip-core
//!            │             │
//!            └────► tsl CLI ◄────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`backup_store`] | Filesystem backup store (read + record) |
//! | [`git_source`] | Git adapter: bounded `git` invocations |
//! | [`document`] | Live document backed by a file on disk |
//! | [`timeline`] | Timeline retrieval and the `log`/`show` commands |
//! | [`diff_cmd`] | The `diff` command |
//! | [`restore_cmd`] | The `restore` command |
//! | [`backup_cmd`] | The `backup` command |
//! | [`sources`] | Source health listing |

pub mod backup_cmd;
pub mod backup_store;
pub mod config;
pub mod diff_cmd;
pub mod document;
pub mod git_source;
pub mod restore_cmd;
pub mod sources;
pub mod timeline;

pub use backup_store::FsBackupStore;
pub use document::FsDocument;
pub use git_source::GitSource;
pub use timeline::{find_snapshot, get_snapshots};

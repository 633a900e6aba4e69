//! # Timeslip Core
//!
//! Shared logic for Timeslip: the unified snapshot model, the line-level
//! diff engine, the merge/dedup pipeline, the restore engine, and the
//! history-source traits.
//!
//! This crate performs no filesystem or process I/O. History arrives
//! through the [`source::BackupSource`] and [`source::VersionControlSource`]
//! traits, and document writes leave through [`restore::LiveDocument`], so
//! the whole pipeline is testable with in-memory fakes
//! ([`source::memory`]).

pub mod diff;
pub mod models;
pub mod restore;
pub mod snapshot;
pub mod source;
pub mod timeline;

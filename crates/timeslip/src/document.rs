//! Live document backed by a file on disk.

use anyhow::{Context, Result};
use async_trait::async_trait;

use timeslip_core::restore::LiveDocument;

/// A document whose content lives at a filesystem path.
pub struct FsDocument {
    path: String,
}

impl FsDocument {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The document's current content.
    pub async fn read(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path))
    }
}

#[async_trait]
impl LiveDocument for FsDocument {
    fn path(&self) -> &str {
        &self.path
    }

    async fn write(&self, content: &str) -> Result<()> {
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path))
    }
}

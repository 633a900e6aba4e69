//! Restore engine: apply a full historical version or a single diff hunk
//! back onto a live document.
//!
//! The live document is only ever mutated here, through the
//! [`LiveDocument`] trait, and only in direct response to an explicit
//! restore request.
//!
//! Hunk application is positional: the selected hunk's removals and
//! insertions are applied at the line positions the freshly computed diff
//! names, with no conflict detection. If the live document drifted inside
//! the hunk's range since the target content was captured, the hunk is
//! still applied at those positions.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::diff::compute_diff;

/// A live, writable document. Implementations persist the new content to
/// the document's own storage; write failures propagate unchanged.
#[async_trait]
pub trait LiveDocument: Send + Sync {
    /// The document's logical path, for diagnostics.
    fn path(&self) -> &str;

    /// Overwrite the document's content.
    async fn write(&self, content: &str) -> Result<()>;
}

/// Overwrite the document with `historical_content` verbatim.
///
/// No validation is performed; any UTF-8 text is accepted.
pub async fn restore_full_version(
    doc: &dyn LiveDocument,
    historical_content: &str,
) -> Result<()> {
    doc.write(historical_content).await?;
    info!(path = doc.path(), "restored full version");
    Ok(())
}

/// Apply a single hunk of the current→target diff to the document.
///
/// The diff is recomputed here: a hunk index is only meaningful relative
/// to a diff freshly computed between the live content and the target
/// content, never a cached one. Returns `Ok(false)` without mutating
/// anything when `hunk_index` is out of range.
pub async fn restore_hunk(
    doc: &dyn LiveDocument,
    current_content: &str,
    target_content: &str,
    hunk_index: usize,
) -> Result<bool> {
    match apply_hunk(current_content, target_content, hunk_index) {
        Some(new_content) => {
            doc.write(&new_content).await?;
            info!(path = doc.path(), hunk_index, "applied hunk");
            Ok(true)
        }
        None => {
            warn!(path = doc.path(), hunk_index, "hunk index out of range");
            Ok(false)
        }
    }
}

/// Pure reconstruction of the content after applying one hunk of
/// `compute_diff(current, target)` to `current_content`.
///
/// Returns `None` when `hunk_index` is out of range. Removals are applied
/// in descending line order (so earlier removals don't shift later
/// indices), then all added lines are inserted as one contiguous block at
/// the first removal position, or at the hunk's nominal start when the
/// hunk removes nothing.
pub fn apply_hunk(
    current_content: &str,
    target_content: &str,
    hunk_index: usize,
) -> Option<String> {
    let diff = compute_diff(current_content, target_content, "current", "target");
    let hunk = diff.hunks.get(hunk_index)?;

    let start_line = hunk.old_start.saturating_sub(1);

    // Walk the hunk's prefixed lines: context advances the cursor,
    // removals mark positions, additions collect new content.
    let mut removed: Vec<usize> = Vec::new();
    let mut added: Vec<&str> = Vec::new();
    let mut offset = 0usize;
    for line in &hunk.lines {
        match line.as_bytes().first() {
            Some(b'-') => {
                removed.push(start_line + offset);
                offset += 1;
            }
            Some(b'+') => added.push(&line[1..]),
            _ => offset += 1,
        }
    }

    let mut result: Vec<&str> = current_content.split('\n').collect();

    for index in removed.iter().rev() {
        if *index < result.len() {
            result.remove(*index);
        }
    }

    let insert_at = removed
        .first()
        .copied()
        .unwrap_or(start_line)
        .min(result.len());
    for (i, line) in added.iter().enumerate() {
        result.insert(insert_at + i, line);
    }

    Some(result.join("\n"))
}

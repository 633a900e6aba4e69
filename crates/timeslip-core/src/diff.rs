//! Line-level diff engine.
//!
//! Computes a structured contextual diff between two text blobs using the
//! `similar` crate's Myers edit script, grouped into hunks with 3 lines of
//! unchanged context on each side. Adjacent hunks whose context windows
//! overlap are merged into one hunk.
//!
//! # Guarantees
//!
//! - Hunks are ordered by ascending position.
//! - Identical inputs yield zero hunks.
//! - Pure and deterministic; labels are display-only and never compared.

use similar::{ChangeTag, TextDiff};

use crate::models::{DiffHunk, DiffResult};

/// Lines of unchanged context kept on each side of a change.
const CONTEXT_LINES: usize = 3;

/// Compute a structured line-level diff between `old_text` and `new_text`.
///
/// The labels become `old_header`/`new_header` on the result and are used
/// only for display. Hunk line numbers are 1-based; hunk `lines` carry a
/// one-character prefix and no trailing newline.
pub fn compute_diff(
    old_text: &str,
    new_text: &str,
    old_label: &str,
    new_label: &str,
) -> DiffResult {
    let diff = TextDiff::from_lines(old_text, new_text);
    let mut hunks = Vec::new();

    for group in diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in diff.iter_changes(op) {
                let prefix = match change.tag() {
                    ChangeTag::Equal => ' ',
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                };
                let value = change.value();
                let value = value.strip_suffix('\n').unwrap_or(value);
                lines.push(format!("{prefix}{value}"));
            }
        }

        hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_lines: old_range.len(),
            new_start: new_range.start + 1,
            new_lines: new_range.len(),
            lines,
        });
    }

    DiffResult {
        old_header: old_label.to_string(),
        new_header: new_label.to_string(),
        hunks,
    }
}

impl DiffResult {
    /// True iff the diff contains at least one hunk. Derived predicate,
    /// no recomputation.
    pub fn has_changes(&self) -> bool {
        !self.hunks.is_empty()
    }

    /// Render the diff in conventional unified format for display.
    pub fn to_unified(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("--- {}\n", self.old_header));
        out.push_str(&format!("+++ {}\n", self.new_header));
        for hunk in &self.hunks {
            out.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines
            ));
            for line in &hunk.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

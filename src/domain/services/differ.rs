//! Differ Domain Service
//!
//! Computes line differences between the current remote content and a
//! freshly rendered document, for previews.

use similar::{ChangeTag, TextDiff};

/// Type of change in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// Line was deleted
    Delete,
    /// Line was inserted
    Insert,
    /// Line is unchanged
    Equal,
}

impl From<ChangeTag> for DiffTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Delete => DiffTag::Delete,
            ChangeTag::Insert => DiffTag::Insert,
            ChangeTag::Equal => DiffTag::Equal,
        }
    }
}

/// Result of a diff operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Unified diff text (empty when there are no changes)
    pub unified: String,
    /// Number of lines added
    pub additions: usize,
    /// Number of lines deleted
    pub deletions: usize,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }

    /// Short summary (e.g. "+5, -3")
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

/// Differ service for computing file differences
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ;

impl Differ {
    pub fn new() -> Self {
        Self
    }

    /// Diff `old` against `new`, labelling the unified headers with `old_label`
    /// and `new_label`
    pub fn diff(&self, old: &str, new: &str, old_label: &str, new_label: &str) -> DiffResult {
        let text_diff = TextDiff::from_lines(old, new);

        let mut result = DiffResult::default();
        for change in text_diff.iter_all_changes() {
            match DiffTag::from(change.tag()) {
                DiffTag::Delete => result.deletions += 1,
                DiffTag::Insert => result.additions += 1,
                DiffTag::Equal => {}
            }
        }

        if result.has_changes() {
            result.unified = text_diff
                .unified_diff()
                .context_radius(3)
                .header(old_label, new_label)
                .to_string();
        }
        result
    }
}

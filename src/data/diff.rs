//! Diff statistics reported by the version-control gateway.

use serde::{Deserialize, Serialize};

/// Line counts for a single changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path to the file relative to repository root.
    pub path: String,
    /// Number of inserted lines.
    pub added: usize,
    /// Number of removed lines.
    pub deleted: usize,
    /// Binary files carry no line counts; `added` and `deleted` are always 0.
    pub binary: bool,
}

impl FileChange {
    /// Creates a text file change.
    pub fn new(path: impl Into<String>, added: usize, deleted: usize) -> Self {
        Self {
            path: path.into(),
            added,
            deleted,
            binary: false,
        }
    }

    /// Creates a binary file change with zeroed line counts.
    pub fn binary(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            added: 0,
            deleted: 0,
            binary: true,
        }
    }
}

/// Per-file changes of one commit plus their totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Changed files in the order the gateway reported them.
    pub files: Vec<FileChange>,
    /// Sum of `added` across all files.
    pub total_added: usize,
    /// Sum of `deleted` across all files.
    pub total_deleted: usize,
}

impl DiffStats {
    /// Builds diff statistics and computes the totals.
    pub fn from_files(files: Vec<FileChange>) -> Self {
        let total_added = files.iter().map(|f| f.added).sum();
        let total_deleted = files.iter().map(|f| f.deleted).sum();
        Self {
            files,
            total_added,
            total_deleted,
        }
    }

    /// Total changed lines (additions plus deletions).
    pub fn total_changed(&self) -> usize {
        self.total_added + self.total_deleted
    }

    /// Number of changed files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file changed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over the changed paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}

/// A file renamed (or moved) by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    /// Path before the commit.
    pub from: String,
    /// Path after the commit.
    pub to: String,
}

impl Rename {
    /// Creates a rename record.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for Rename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \u{2192} {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_include_binary_as_zero() {
        let stats = DiffStats::from_files(vec![
            FileChange::new("src/main.rs", 10, 2),
            FileChange::binary("logo.png"),
            FileChange::new("README.md", 1, 1),
        ]);
        assert_eq!(stats.total_added, 11);
        assert_eq!(stats.total_deleted, 3);
        assert_eq!(stats.total_changed(), 14);
        assert_eq!(stats.file_count(), 3);
    }

    #[test]
    fn binary_change_has_no_line_counts() {
        let change = FileChange::binary("font.woff2");
        assert!(change.binary);
        assert_eq!((change.added, change.deleted), (0, 0));
    }

    #[test]
    fn empty_stats() {
        let stats = DiffStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.total_changed(), 0);
    }

    #[test]
    fn rename_display_uses_arrow() {
        let rename = Rename::new("old/a.go", "new/a.go");
        assert_eq!(rename.to_string(), "old/a.go \u{2192} new/a.go");
    }
}

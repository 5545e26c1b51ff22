//! Staged change model and status-code classification.

use std::fmt;

/// Message used whenever there is nothing staged.
pub const NO_STAGED_CHANGES: &str = "chore: no staged changes";

/// A single staged path with its git status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChange {
    /// First character of git's status column (`A`, `M`, `D`, `R`, ...).
    pub status: char,
    pub path: String,
}

impl StagedChange {
    pub fn new(status: char, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        ChangeKind::from_status(self.status)
    }
}

/// Staged changes in the order git reported them.
pub type ChangeSet = Vec<StagedChange>;

/// Normalized kind of a staged change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Updated,
    /// Catch-all for status codes without a dedicated label.
    Changed,
}

impl ChangeKind {
    pub fn from_status(status: char) -> Self {
        match status {
            'A' => ChangeKind::Added,
            'M' => ChangeKind::Modified,
            'D' => ChangeKind::Deleted,
            'R' => ChangeKind::Renamed,
            'C' => ChangeKind::Copied,
            'U' => ChangeKind::Updated,
            _ => ChangeKind::Changed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
            ChangeKind::Copied => "copied",
            ChangeKind::Updated => "updated",
            ChangeKind::Changed => "changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_labels() {
        let cases = [
            ('A', "added"),
            ('M', "modified"),
            ('D', "deleted"),
            ('R', "renamed"),
            ('C', "copied"),
            ('U', "updated"),
        ];
        for (status, label) in cases {
            assert_eq!(ChangeKind::from_status(status).label(), label, "status {status}");
        }
    }

    #[test]
    fn test_unknown_status_is_changed() {
        assert_eq!(ChangeKind::from_status('T'), ChangeKind::Changed);
        assert_eq!(ChangeKind::from_status('X'), ChangeKind::Changed);
        assert_eq!(ChangeKind::Changed.to_string(), "changed");
    }

    #[test]
    fn test_staged_change_kind() {
        let change = StagedChange::new('R', "src/new_name.rs");
        assert_eq!(change.kind(), ChangeKind::Renamed);
        assert_eq!(change.path, "src/new_name.rs");
    }
}

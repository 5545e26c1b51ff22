//! Deterministic commit message built from staged file statuses.

use crate::commit::change::{ChangeKind, NO_STAGED_CHANGES, StagedChange};

/// Default number of file names listed per category.
pub const DEFAULT_MAX_FILES_PER_CATEGORY: usize = 5;

/// Paths sharing one status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub status: char,
    pub kind: ChangeKind,
    pub paths: Vec<&'a str>,
}

impl CategoryGroup<'_> {
    /// Render as `"<label> a, b and N more"`.
    ///
    /// At most `max_files` names are listed; the rest are only counted.
    pub fn render(&self, max_files: usize) -> String {
        let mut part = self.kind.label().to_string();

        let shown: Vec<&str> = self.paths.iter().take(max_files).copied().collect();
        if !shown.is_empty() {
            part.push(' ');
            part.push_str(&shown.join(", "));
        }

        if self.paths.len() > max_files {
            part.push_str(&format!(" and {} more", self.paths.len() - max_files));
        }

        part
    }
}

/// Group changes by status code, keeping the order in which codes first appear.
pub fn group_by_status(changes: &[StagedChange]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for change in changes {
        match groups.iter_mut().find(|g| g.status == change.status) {
            Some(group) => group.paths.push(&change.path),
            None => groups.push(CategoryGroup {
                status: change.status,
                kind: change.kind(),
                paths: vec![&change.path],
            }),
        }
    }

    groups
}

/// Build a `chore:` message summarizing every staged category.
///
/// Never fails; an empty change set yields [`NO_STAGED_CHANGES`].
pub fn build_deterministic_message(changes: &[StagedChange], max_files_per_category: usize) -> String {
    if changes.is_empty() {
        return NO_STAGED_CHANGES.to_string();
    }

    let summary = group_by_status(changes)
        .iter()
        .map(|group| group.render(max_files_per_category))
        .collect::<Vec<_>>()
        .join("; ");

    format!("chore: {summary}")
}

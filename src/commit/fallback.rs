//! Constant-time fallback message used when the LLM path is unavailable.

use crate::commit::change::{NO_STAGED_CHANGES, StagedChange};

/// Pick a generic conventional-commit message from which kinds are present.
///
/// Only the presence of added, modified, and deleted files matters; any mix
/// of kinds (or only other kinds) yields `chore: update files`.
pub fn build_fallback_message(changes: &[StagedChange]) -> String {
    if changes.is_empty() {
        return NO_STAGED_CHANGES.to_string();
    }

    let has = |code: char| changes.iter().any(|c| c.status == code);
    let (added, modified, deleted) = (has('A'), has('M'), has('D'));

    let message = match (added, modified, deleted) {
        (true, false, false) => "feat: add new files",
        (false, true, false) => "fix: update existing files",
        (false, false, true) => "chore: remove files",
        _ => "chore: update files",
    };

    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(items: &[(char, &str)]) -> Vec<StagedChange> {
        items.iter().map(|(s, p)| StagedChange::new(*s, *p)).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(build_fallback_message(&[]), "chore: no staged changes");
    }

    #[test]
    fn test_decision_table() {
        let cases = vec![
            (changes(&[('A', "a.ts"), ('A', "b.ts")]), "feat: add new files"),
            (changes(&[('M', "a.ts")]), "fix: update existing files"),
            (changes(&[('D', "a.ts")]), "chore: remove files"),
            (changes(&[('M', "a.ts"), ('D', "b.ts")]), "chore: update files"),
            (changes(&[('A', "a.ts"), ('M', "b.ts")]), "chore: update files"),
            (changes(&[('A', "a"), ('M', "b"), ('D', "c")]), "chore: update files"),
        ];

        for (input, expected) in cases {
            assert_eq!(build_fallback_message(&input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_other_kinds_do_not_count() {
        assert_eq!(build_fallback_message(&changes(&[('R', "x")])), "chore: update files");
        // Renames alongside additions still count as "added only"
        assert_eq!(
            build_fallback_message(&changes(&[('R', "x"), ('A', "y")])),
            "feat: add new files"
        );
    }
}

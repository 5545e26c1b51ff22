//! Commit message synthesis from staged changes.

pub mod change;
pub mod deterministic;
pub mod engine;
pub mod fallback;

pub use change::{ChangeKind, ChangeSet, NO_STAGED_CHANGES, StagedChange};
pub use deterministic::{
    CategoryGroup, DEFAULT_MAX_FILES_PER_CATEGORY, build_deterministic_message, group_by_status,
};
pub use engine::MessageEngine;
pub use fallback::build_fallback_message;

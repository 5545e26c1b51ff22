//! Git operations via the system `git` binary.

pub mod executor;
pub mod ops;
pub mod status;

pub use executor::{GitExecutor, GitOutput, SystemGit};
pub use ops::{commit, current_branch, ensure_git_available, push, stage_all};
pub use status::{list_staged_changes, parse_name_status, staged_diff};

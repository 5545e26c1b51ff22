//! Staged status and diff introspection.
//!
//! Reads never fail: a git error or non-zero exit is logged and treated as
//! "nothing staged".

use tracing::warn;

use crate::commit::change::{ChangeSet, StagedChange};
use crate::git::executor::GitExecutor;

const NAME_STATUS_ARGS: [&str; 3] = ["diff", "--cached", "--name-status"];
const DIFF_ARGS: [&str; 2] = ["diff", "--cached"];

/// List staged files with their status codes.
pub async fn list_staged_changes<G: GitExecutor + ?Sized>(git: &G) -> ChangeSet {
    match read_stdout(git, &NAME_STATUS_ARGS).await {
        Some(stdout) => parse_name_status(&stdout),
        None => Vec::new(),
    }
}

/// Read the full staged diff body. Returns an empty string on failure.
pub async fn staged_diff<G: GitExecutor + ?Sized>(git: &G) -> String {
    read_stdout(git, &DIFF_ARGS).await.unwrap_or_default()
}

/// Parse `git diff --name-status` output.
///
/// Each line is `<status>\t<path>`. Only the first character of the status
/// is kept (`R100` becomes `R`). The remaining whitespace-separated tokens are
/// rejoined with a single space to form the path. Lines missing either part
/// are skipped.
pub fn parse_name_status(output: &str) -> ChangeSet {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let status = tokens.next()?.chars().next()?;
            let path = tokens.collect::<Vec<_>>().join(" ");
            if path.is_empty() {
                return None;
            }
            Some(StagedChange::new(status, path))
        })
        .collect()
}

async fn read_stdout<G: GitExecutor + ?Sized>(git: &G, args: &[&str]) -> Option<String> {
    match git.run(args).await {
        Ok(output) if output.success() => Some(output.stdout),
        Ok(output) => {
            warn!(
                "git {} exited with {:?}: {}",
                args.join(" "),
                output.code,
                output.stderr.trim()
            );
            None
        }
        Err(e) => {
            warn!("git {} failed: {e}", args.join(" "));
            None
        }
    }
}

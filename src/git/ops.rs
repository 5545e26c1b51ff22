//! Repository operations used by the commit flow: stage, commit, branch, push.

use tracing::debug;

use crate::error::GitError;
use crate::git::executor::{GitExecutor, GitOutput};

/// Check that the `git` binary is on PATH.
pub fn ensure_git_available() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}

/// Stage every change in the working tree (`git add -A`).
pub async fn stage_all<G: GitExecutor + ?Sized>(git: &G) -> Result<(), GitError> {
    run_git(git, &["add", "-A"], "add").await?;
    Ok(())
}

/// Commit the staged changes with `message`. Returns git's stdout.
pub async fn commit<G: GitExecutor + ?Sized>(git: &G, message: &str) -> Result<String, GitError> {
    let output = run_git(git, &["commit", "-m", message], "commit").await?;
    Ok(output.stdout)
}

/// Name of the checked-out branch.
pub async fn current_branch<G: GitExecutor + ?Sized>(git: &G) -> Result<String, GitError> {
    let output = run_git(git, &["rev-parse", "--abbrev-ref", "HEAD"], "rev-parse").await?;
    let branch = output.stdout.trim();
    if branch.is_empty() {
        return Err(GitError::NoBranch);
    }
    Ok(branch.to_string())
}

/// Push `branch` to `remote`. Returns git's combined output for display.
pub async fn push<G: GitExecutor + ?Sized>(
    git: &G,
    remote: &str,
    branch: &str,
) -> Result<String, GitError> {
    let output = run_git(git, &["push", remote, branch], "push").await?;
    // git push reports progress on stderr
    Ok(format!("{}{}", output.stdout, output.stderr))
}

/// Run a git command and turn a non-zero exit into a descriptive error.
async fn run_git<G: GitExecutor + ?Sized>(
    git: &G,
    args: &[&str],
    operation: &str,
) -> Result<GitOutput, GitError> {
    let output = git.run(args).await?;

    if !output.success() {
        debug!("git {} failed: {}", operation, output.stderr.trim());
        return Err(GitError::NonZeroExit {
            operation: operation.to_string(),
            code: output.code.unwrap_or(-1),
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(output)
}

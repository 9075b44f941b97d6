//! Repository-level checks and queries.

use tracing::{error, info};

use super::error::{GitError, Result};
use crate::shared::process::CommandRunner;

/// Returns true when `git` can be executed, logging its version.
pub async fn verify_git_installed(runner: &impl CommandRunner) -> bool {
    info!("Checking Git installation...");
    match runner.run_git(&["--version"]).await {
        Ok(version) => {
            info!("Git Version: {version}");
            true
        }
        Err(e) => {
            error!("Failed to verify Git installation: {e}");
            false
        }
    }
}

/// Fails unless `git status --porcelain` reports nothing.
pub async fn ensure_clean_working_tree(runner: &impl CommandRunner) -> Result<()> {
    info!("Checking for unstaged changes...");
    let status = runner
        .run_git(&["status", "--porcelain"])
        .await
        .map_err(|e| {
            error!("Failed to verify clean working tree: {e}");
            GitError::StatusCheck(e)
        })?;

    if !status.trim().is_empty() {
        let err = GitError::DirtyWorkingTree;
        error!("{err}");
        return Err(err);
    }

    info!("Working tree is clean.");
    Ok(())
}

pub async fn current_branch(runner: &impl CommandRunner) -> Result<String> {
    // rev-parse --abbrev-ref reports "HEAD" when detached instead of failing
    let branch = runner.run_git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
    Ok(branch.trim().to_string())
}

/// Local branch names as listed by `git branch`, without the current/worktree markers.
pub async fn local_branches(runner: &impl CommandRunner) -> Result<Vec<String>> {
    let output = runner.run_git(&["branch"]).await?;
    Ok(parse_branch_list(&output))
}

fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_matches(|c: char| c == '*' || c == '+' || c.is_whitespace()))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

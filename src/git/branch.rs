//! Branch provisioning and comparison.

use tracing::{debug, error, info};

use super::branch_name::{DEV_BRANCH, MAIN_BRANCH, is_feature_branch};
use super::error::{GitError, Result};
use super::repo::{current_branch, local_branches};
use crate::shared::outcome::{StepLog, StepOutcome};
use crate::shared::process::CommandRunner;

/// Long-lived branches every git-flow repository needs.
pub const REQUIRED_BRANCHES: [&str; 2] = [MAIN_BRANCH, DEV_BRANCH];

/// Creates `main` and `dev` when missing and tries to push each new branch.
///
/// Nothing is created while a feature branch is checked out. A failed push is
/// recorded as a warning (a new repository often has no remote yet); a failed
/// `git branch` is fatal.
pub async fn ensure_required_branches_exist(runner: &impl CommandRunner) -> Result<StepLog> {
    let current = current_branch(runner).await?;
    let branches = local_branches(runner).await?;
    let mut log = StepLog::new();

    if is_feature_branch(&current) {
        info!("On feature branch {current}, skipping creation of main and dev.");
        return Ok(log);
    }

    for branch in REQUIRED_BRANCHES {
        if branches.iter().any(|b| b == branch) {
            continue;
        }
        create_branch(runner, branch, &mut log).await?;
    }

    Ok(log)
}

async fn create_branch(runner: &impl CommandRunner, branch: &str, log: &mut StepLog) -> Result<()> {
    info!("Creating {branch} branch...");
    let created = runner
        .run_git(&["branch", branch])
        .await
        .map_err(|source| GitError::CreateBranch {
            branch: branch.to_string(),
            source,
        });
    if let Err(e) = &created {
        error!("{e}");
    }
    log.record(format!("create {branch}"), StepOutcome::require(created))?;

    let pushed = runner.run_git(&["push", "-u", "origin", branch]).await;
    if pushed.is_ok() {
        info!("Pushed {branch} branch to remote.");
    }
    let outcome: StepOutcome<GitError> = StepOutcome::tolerate(pushed, |e| {
        format!(
            "Could not push {branch} branch to remote. This is normal for new repositories. ({e})"
        )
    });
    log.record(format!("push {branch}"), outcome)
}

/// Whether `source` has commits that `target` does not.
///
/// Any failure to run or parse `git rev-list --count` counts as "no commits".
pub async fn has_commits(runner: &impl CommandRunner, source: &str, target: &str) -> bool {
    let range = format!("{target}..{source}");
    match runner.run_git(&["rev-list", "--count", &range]).await {
        Ok(count) => count.trim().parse::<u64>().is_ok_and(|n| n > 0),
        Err(e) => {
            debug!("Could not count commits in {range}: {e}");
            false
        }
    }
}

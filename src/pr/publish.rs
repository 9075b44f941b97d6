//! Publishing planned pull requests through `gh`.

use tracing::{debug, error, info};

use super::error::{PrError, Result};
use super::plan::PullRequestInfo;
use crate::gh::{create_pr, ensure_authenticated};
use crate::git::branch_name::{DEV_BRANCH, FlowPrefix, strip_feature_prefix};
use crate::shared::process::CommandRunner;

/// Opens the pull request for a finished git-flow branch.
///
/// Authenticates `gh`, refreshes `dev`, then creates the PR from
/// `origin/<source>`. Hotfix and release branches get a second PR into `dev`.
/// Returns the URLs of the created pull requests.
pub async fn publish_finished_branch(
    runner: &impl CommandRunner,
    info: &PullRequestInfo,
) -> Result<Vec<String>> {
    debug!("Attempting to authenticate with GitHub CLI");
    ensure_authenticated(runner).await?;

    sync_dev(runner).await?;

    let head = format!("origin/{}", info.source_branch);
    let mut urls = vec![create(runner, info, &head).await?];

    if info
        .source_prefix()
        .is_some_and(FlowPrefix::needs_dev_backport)
    {
        info!("Creating additional PR into {DEV_BRANCH}");
        urls.push(create(runner, &info.with_base(DEV_BRANCH), &head).await?);
    }

    Ok(urls)
}

/// Pushes the current feature branch with `git flow feature publish` and
/// opens a single pull request into `dev`.
pub async fn publish_feature(
    runner: &impl CommandRunner,
    info: &PullRequestInfo,
) -> Result<String> {
    let name = strip_feature_prefix(&info.source_branch).unwrap_or(&info.source_branch);
    runner
        .run_git(&["flow", "feature", "publish", name])
        .await
        .map_err(|source| {
            let err = PrError::Publish {
                branch: info.source_branch.clone(),
                source,
            };
            error!("{err}");
            err
        })?;

    create(runner, info, &info.source_branch).await
}

async fn sync_dev(runner: &impl CommandRunner) -> Result<()> {
    let steps: [&[&str]; 2] = [&["checkout", DEV_BRANCH], &["pull", "origin", DEV_BRANCH]];
    for args in steps {
        runner.run_git(args).await.map_err(|e| {
            error!("Failed to update {DEV_BRANCH}: {e}");
            PrError::SyncBase(e)
        })?;
    }
    Ok(())
}

async fn create(runner: &impl CommandRunner, info: &PullRequestInfo, head: &str) -> Result<String> {
    create_pr(runner, &info.title, &info.body, &info.base_branch, head)
        .await
        .map_err(|source| {
            let err = PrError::Create {
                head: head.to_string(),
                base: info.base_branch.clone(),
                source,
            };
            error!("{err}");
            err
        })
}

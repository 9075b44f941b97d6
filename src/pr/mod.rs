//! Pull request creation flows.
//!
//! [`create_from_current_branch`] publishes the feature branch that is checked
//! out. [`create_for_finished_branch`] works out which git-flow branch was just
//! finished and opens the pull request(s) for it.

mod error;
mod plan;
mod publish;
mod resolve;

use tracing::info;

use crate::git::branch_name::DEV_BRANCH;
use crate::git::has_commits;
use crate::shared::process::CommandRunner;

use error::Result;
use plan::{plan, plan_feature_merge};
use publish::{publish_feature, publish_finished_branch};
use resolve::{ResolveStrategy, resolve_branch};

/// Why no pull request was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoBranch,
    NotFeatureBranch(String),
    NoCommits(String),
    UnrecognizedBranch(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoBranch => write!(f, "no source branch found"),
            Self::NotFeatureBranch(branch) => write!(f, "{branch} is not a feature branch"),
            Self::NoCommits(branch) => write!(f, "{branch} has no commits ahead of {DEV_BRANCH}"),
            Self::UnrecognizedBranch(branch) => write!(f, "{branch} is not a git-flow branch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrOutcome {
    /// URLs of the pull requests that were opened.
    Created(Vec<String>),
    Skipped(SkipReason),
}

/// Publishes the checked-out feature branch and opens a PR into `dev`.
///
/// Branches other than `feature/*`, and feature branches without commits
/// ahead of `dev`, are skipped without error.
pub async fn create_from_current_branch(runner: &impl CommandRunner) -> Result<PrOutcome> {
    let Some(branch) = resolve_branch(runner, ResolveStrategy::Direct).await? else {
        return Ok(PrOutcome::Skipped(SkipReason::NoBranch));
    };

    let Some(info) = plan_feature_merge(&branch) else {
        info!("Not a feature branch: {branch}");
        return Ok(PrOutcome::Skipped(SkipReason::NotFeatureBranch(branch)));
    };

    if !has_commits(runner, &branch, DEV_BRANCH).await {
        info!("No commits to create PR for {branch}");
        return Ok(PrOutcome::Skipped(SkipReason::NoCommits(branch)));
    }

    let url = publish_feature(runner, &info).await?;
    Ok(PrOutcome::Created(vec![url]))
}

/// Opens the pull request(s) for the git-flow branch found in recent history.
pub async fn create_for_finished_branch(runner: &impl CommandRunner) -> Result<PrOutcome> {
    let Some(branch) = resolve_branch(runner, ResolveStrategy::History).await? else {
        return Ok(PrOutcome::Skipped(SkipReason::NoBranch));
    };

    let Some(info) = plan(&branch) else {
        info!("Branch type not recognized: {branch}");
        return Ok(PrOutcome::Skipped(SkipReason::UnrecognizedBranch(branch)));
    };

    let urls = publish_finished_branch(runner, &info).await?;
    Ok(PrOutcome::Created(urls))
}

#[cfg(test)]
mod tests {
    use super::error::PrError;
    use super::*;
    use crate::shared::process::test_utils::MockCommandRunner;
    use rstest::rstest;

    const FEATURE_INTO_DEV: &str = "gh pr create --title 'Merge feature/login into dev' \
        --body 'Automatically generated PR for merging branch feature/login into dev.' \
        --base dev --head feature/login";
    const RELEASE_INTO_MAIN: &str = "gh pr create --title 'Release: 2.0' \
        --body 'Release is ready for production.' --base main --head origin/release/2.0";
    const RELEASE_INTO_DEV: &str = "gh pr create --title 'Release: 2.0' \
        --body 'Release is ready for production.' --base dev --head origin/release/2.0";

    fn on_branch(branch: &str) -> MockCommandRunner {
        MockCommandRunner::new().on("git rev-parse --abbrev-ref HEAD", branch)
    }

    #[tokio::test]
    async fn feature_without_commits_opens_nothing() {
        let runner = on_branch("feature/login").on("git rev-list --count dev..feature/login", "0");

        let outcome = create_from_current_branch(&runner).await.unwrap();

        assert_eq!(
            outcome,
            PrOutcome::Skipped(SkipReason::NoCommits("feature/login".to_string()))
        );
        assert!(!runner.was_called("git flow feature publish login"));
        assert!(runner.calls_starting_with("gh").is_empty());
    }

    #[tokio::test]
    async fn feature_with_commits_is_published() {
        let runner = on_branch("feature/login")
            .on("git rev-list --count dev..feature/login", "2")
            .on(FEATURE_INTO_DEV, "https://github.com/owner/repo/pull/7");

        let outcome = create_from_current_branch(&runner).await.unwrap();

        assert_eq!(
            outcome,
            PrOutcome::Created(vec!["https://github.com/owner/repo/pull/7".to_string()])
        );
        assert!(runner.was_called("git flow feature publish login"));
    }

    #[rstest]
    #[case::dev("dev")]
    #[case::main("main")]
    #[case::hotfix("hotfix/1.2")]
    #[case::detached("HEAD")]
    #[tokio::test]
    async fn current_branch_must_be_a_feature(#[case] branch: &str) {
        let runner = on_branch(branch);

        let outcome = create_from_current_branch(&runner).await.unwrap();

        assert_eq!(
            outcome,
            PrOutcome::Skipped(SkipReason::NotFeatureBranch(branch.to_string()))
        );
        assert!(runner.calls_starting_with("git rev-list").is_empty());
    }

    #[tokio::test]
    async fn empty_current_branch_is_skipped() {
        let runner = on_branch("");
        let outcome = create_from_current_branch(&runner).await.unwrap();
        assert_eq!(outcome, PrOutcome::Skipped(SkipReason::NoBranch));
    }

    #[tokio::test]
    async fn finished_release_gets_two_prs() {
        let runner = MockCommandRunner::new()
            .on("git reflog -1", "0a1b2c3 HEAD@{0}: checkout: moving from release/2.0 to main")
            .on("gh --version", "gh version 2.60.0")
            .on("gh auth status", "Logged in")
            .on(RELEASE_INTO_MAIN, "https://github.com/owner/repo/pull/10")
            .on(RELEASE_INTO_DEV, "https://github.com/owner/repo/pull/11");

        let outcome = create_for_finished_branch(&runner).await.unwrap();

        assert_eq!(
            outcome,
            PrOutcome::Created(vec![
                "https://github.com/owner/repo/pull/10".to_string(),
                "https://github.com/owner/repo/pull/11".to_string(),
            ])
        );
        let titles: Vec<_> = runner
            .calls_starting_with("gh pr create")
            .into_iter()
            .map(|call| call[4].clone())
            .collect();
        assert_eq!(titles, vec!["Release: 2.0", "Release: 2.0"]);
    }

    #[tokio::test]
    async fn nothing_in_history_is_skipped() {
        let runner = MockCommandRunner::new()
            .on("git reflog -1", "0a1b2c3 HEAD@{0}: commit: Fix typo")
            .on("git log -1 --merges --oneline", "");

        let outcome = create_for_finished_branch(&runner).await.unwrap();

        assert_eq!(outcome, PrOutcome::Skipped(SkipReason::NoBranch));
        assert!(runner.calls_starting_with("gh").is_empty());
    }

    #[test]
    fn skip_reason_names_the_branch() {
        assert_eq!(
            SkipReason::NoCommits("feature/login".to_string()).to_string(),
            "feature/login has no commits ahead of dev"
        );
    }

    #[tokio::test]
    async fn history_failure_is_an_error() {
        let runner =
            MockCommandRunner::new().fail("git reflog -1", "fatal: bad default revision 'HEAD'");

        let err = create_for_finished_branch(&runner).await.unwrap_err();
        assert!(matches!(err, PrError::Resolve(_)), "got: {err:?}");
    }
}

//! Pull request metadata derived from the branch name.

use crate::git::branch_name::{
    BranchKind, DEV_BRANCH, FlowPrefix, MAIN_BRANCH, strip_feature_prefix,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    pub title: String,
    pub body: String,
    pub base_branch: String,
    pub source_branch: String,
}

impl PullRequestInfo {
    /// Same pull request aimed at a different base branch.
    pub fn with_base(&self, base: &str) -> Self {
        Self {
            base_branch: base.to_string(),
            ..self.clone()
        }
    }

    /// The git-flow prefix of the source branch, if any.
    pub fn source_prefix(&self) -> Option<FlowPrefix> {
        match BranchKind::classify(&self.source_branch) {
            BranchKind::Flow { prefix, .. } => Some(prefix),
            _ => None,
        }
    }
}

/// Maps a finished git-flow branch to its pull request.
///
/// Returns `None` for `main`, `dev` and any branch without a recognized
/// prefix: there is nothing to publish for those.
pub fn plan(branch: &str) -> Option<PullRequestInfo> {
    let BranchKind::Flow { prefix, name } = BranchKind::classify(branch) else {
        return None;
    };

    let (title, body, base) = match prefix {
        FlowPrefix::Feature => (
            format!("Feature completed: {name}"),
            "This feature is ready for review.",
            DEV_BRANCH,
        ),
        FlowPrefix::Hotfix => (
            format!("Hotfix: {name}"),
            "Urgent hotfix for production.",
            MAIN_BRANCH,
        ),
        FlowPrefix::Bugfix => (
            format!("Bugfix: {name}"),
            "Bug fixed and ready for review.",
            DEV_BRANCH,
        ),
        FlowPrefix::Release => (
            format!("Release: {name}"),
            "Release is ready for production.",
            MAIN_BRANCH,
        ),
    };

    Some(PullRequestInfo {
        title,
        body: body.to_string(),
        base_branch: base.to_string(),
        source_branch: branch.to_string(),
    })
}

/// Pull request merging the current feature branch into `dev`.
///
/// Only `feature/` branches (any case) qualify.
pub fn plan_feature_merge(branch: &str) -> Option<PullRequestInfo> {
    strip_feature_prefix(branch)?;

    Some(PullRequestInfo {
        title: format!("Merge {branch} into {DEV_BRANCH}"),
        body: format!("Automatically generated PR for merging branch {branch} into {DEV_BRANCH}."),
        base_branch: DEV_BRANCH.to_string(),
        source_branch: branch.to_string(),
    })
}

//! Git error types.

use thiserror::Error;

use crate::shared::process::ProcessError;

#[derive(Error, Debug)]
pub enum GitError {
    #[error(
        "Working tree contains unstaged changes. Please commit or stash changes before proceeding."
    )]
    DirtyWorkingTree,

    #[error("Failed to verify working tree state: {0}")]
    StatusCheck(#[source] ProcessError),

    #[error("Error creating {branch} branch: {source}")]
    CreateBranch {
        branch: String,
        source: ProcessError,
    },

    #[error("Git command failed: {0}")]
    Command(#[from] ProcessError),
}

pub type Result<T> = std::result::Result<T, GitError>;

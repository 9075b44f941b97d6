//! Pull request pipeline error types.

use thiserror::Error;

use crate::gh::AuthError;
use crate::shared::process::ProcessError;

#[derive(Error, Debug)]
pub enum PrError {
    #[error("Failed to determine source branch: {0}")]
    Resolve(#[source] ProcessError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Failed to publish {branch}: {source}")]
    Publish {
        branch: String,
        source: ProcessError,
    },

    #[error("Failed to update dev before creating PR: {0}")]
    SyncBase(#[source] ProcessError),

    #[error("Could not create PR from {head} into {base}: {source}")]
    Create {
        head: String,
        base: String,
        source: ProcessError,
    },
}

pub type Result<T> = std::result::Result<T, PrError>;

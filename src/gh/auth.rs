//! GitHub CLI session checks.

use thiserror::Error;
use tracing::{debug, error, info};

use crate::shared::process::{CommandRunner, ProcessError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("GitHub CLI (gh) is not installed")]
    CliMissing(#[source] Option<ProcessError>),

    #[error("Failed to authenticate with GitHub CLI: {0}")]
    LoginFailed(String),
}

/// Makes sure `gh` is installed and has an active session, logging in if needed.
pub async fn ensure_authenticated(runner: &impl CommandRunner) -> Result<(), AuthError> {
    debug!("Starting GitHub CLI authentication check");

    match runner.run_gh(&["--version"]).await {
        Ok(version) if !version.trim().is_empty() => {
            debug!("GitHub CLI version: {version}");
        }
        Ok(_) => return Err(log_failure(AuthError::CliMissing(None))),
        Err(e) => return Err(log_failure(AuthError::CliMissing(Some(e)))),
    }

    // `gh auth status` exits non-zero when no account is logged in
    match runner.run_gh(&["auth", "status"]).await {
        Ok(status) => {
            debug!("GitHub CLI auth status: {status}");
            return Ok(());
        }
        Err(e) => debug!("No active GitHub CLI session: {e}"),
    }

    // gh only prompts when attached to a terminal; it reports on stderr
    info!("Attempting GitHub CLI login");
    match runner.run_interactive("gh", &["auth", "login"]).await {
        Ok(()) => {
            info!("Logged in to GitHub CLI");
            Ok(())
        }
        Err(e) => Err(log_failure(AuthError::LoginFailed(e.to_string()))),
    }
}

fn log_failure(err: AuthError) -> AuthError {
    error!("GitHub CLI authentication error: {err}");
    err
}

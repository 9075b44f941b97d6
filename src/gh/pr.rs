//! Pull request creation.

use tracing::{debug, info};

use crate::shared::process::{CommandRunner, ProcessError, command_line};

/// Runs `gh pr create` and returns the URL it prints.
pub async fn create_pr(
    runner: &impl CommandRunner,
    title: &str,
    body: &str,
    base: &str,
    head: &str,
) -> Result<String, ProcessError> {
    let args = [
        "pr", "create", "--title", title, "--body", body, "--base", base, "--head", head,
    ];
    debug!("Creating PR with command: {}", command_line("gh", &args));

    let url = runner.run_gh(&args).await?;
    info!("Successfully created PR: {url}");
    Ok(url)
}

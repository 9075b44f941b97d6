//! git-flow configuration keys written to the local repository config.

use tracing::{error, info};

use super::branch::ensure_required_branches_exist;
use super::error::{GitError, Result};
use crate::shared::outcome::{StepLog, StepOutcome};
use crate::shared::process::{CommandRunner, ProcessError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: &'static str,
}

const fn entry(key: &'static str, value: &'static str) -> ConfigEntry {
    ConfigEntry { key, value }
}

/// Keys applied on every run, in order.
pub const GITFLOW_CONFIG: [ConfigEntry; 15] = [
    entry("gitflow.branch.master", "main"),
    entry("gitflow.branch.develop", "dev"),
    entry("gitflow.prefix.feature", "feature/"),
    entry("gitflow.prefix.bugfix", "bugfix/"),
    entry("gitflow.prefix.release", "release/"),
    entry("gitflow.prefix.hotfix", "hotfix/"),
    entry("gitflow.prefix.support", "support/"),
    entry("gitflow.prefix.versiontag", "v"),
    entry("gitflow.feature.start.fetch", "true"),
    entry("gitflow.feature.finish.fetch", "true"),
    entry("gitflow.feature.finish", "false"),
    entry("gitflow.feature.no-ff", "true"),
    entry("gitflow.feature.no-merge", "true"),
    entry("gitflow.feature.keepbranch", "true"),
    entry("gitflow.path.hooks", ".husky"),
];

/// Marks the repository as initialized for the git-flow tooling.
pub const GITFLOW_STAMPS: [ConfigEntry; 2] = [
    entry("gitflow.initialized", "true"),
    entry("gitflow.version", "1.12.3"),
];

async fn set_local(
    runner: &impl CommandRunner,
    entry: &ConfigEntry,
) -> std::result::Result<String, ProcessError> {
    runner
        .run_git(&["config", "--local", entry.key, entry.value])
        .await
}

/// Applies [`GITFLOW_CONFIG`] and then [`GITFLOW_STAMPS`].
///
/// Every key is attempted; a key that cannot be set is recorded as a warning.
pub async fn configure_git_flow(runner: &impl CommandRunner) -> Result<StepLog> {
    let mut log = StepLog::new();

    for entry in &GITFLOW_CONFIG {
        let result = set_local(runner, entry).await;
        if result.is_ok() {
            info!("Set {} to {}", entry.key, entry.value);
        }
        let outcome: StepOutcome<GitError> =
            StepOutcome::tolerate(result, |e| format!("Failed to set {}: {e}", entry.key));
        log.record(entry.key, outcome)?;
    }

    for stamp in &GITFLOW_STAMPS {
        let result = set_local(runner, stamp).await;
        let outcome: StepOutcome<GitError> = StepOutcome::tolerate(result, |e| {
            format!("Git flow initialization warning: {e}")
        });
        log.record(stamp.key, outcome)?;
    }

    Ok(log)
}

/// Provisions `main`/`dev` and applies the git-flow configuration.
pub async fn ensure_git_flow_configured(runner: &impl CommandRunner) -> Result<StepLog> {
    info!("Initializing Git Flow...");

    match provision_and_configure(runner).await {
        Ok(log) => {
            let warnings = log.warnings().count();
            if warnings > 0 {
                info!("Git Flow configuration completed with {warnings} warning(s).");
            } else {
                info!("Git Flow configuration completed successfully.");
            }
            Ok(log)
        }
        Err(e) => {
            error!("An error occurred while configuring Git Flow: {e}");
            Err(e)
        }
    }
}

async fn provision_and_configure(runner: &impl CommandRunner) -> Result<StepLog> {
    let mut log = ensure_required_branches_exist(runner).await?;
    log.extend(configure_git_flow(runner).await?);
    Ok(log)
}

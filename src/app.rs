//! Top-level sequencing of a repository run.
//!
//! Checks run in a fixed order: git is installed, the working tree is clean,
//! git-flow is configured. Only then are package commands or pull request
//! flows dispatched. Every error is reported once, here.

use std::process::ExitCode;

use tracing::{debug, error, info};

use crate::git::{ensure_clean_working_tree, ensure_git_flow_configured, verify_git_installed};
use crate::pr::{self, PrOutcome};
use crate::shared::process::CommandRunner;

/// Handles command-line tokens that are not gitflow-pr's own commands.
pub trait PackageCommandHandler {
    /// Returns `Ok(true)` when `args` were recognized and handled.
    async fn handle(&self, args: &[String]) -> anyhow::Result<bool>;
}

/// Handler used when no package manager integration is available.
pub struct NoPackageCommands;

impl PackageCommandHandler for NoPackageCommands {
    async fn handle(&self, args: &[String]) -> anyhow::Result<bool> {
        debug!(?args, "No package command handler configured");
        Ok(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrFlow {
    /// Publish the checked-out feature branch.
    CurrentBranch,
    /// Open PRs for the branch found in recent history.
    FinishedBranch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub package_args: Vec<String>,
    pub pr_flow: Option<PrFlow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failure => ExitCode::FAILURE,
        }
    }
}

pub async fn run(
    runner: &impl CommandRunner,
    packages: &impl PackageCommandHandler,
    request: &Request,
) -> RunStatus {
    match execute(runner, packages, request).await {
        Ok(status) => status,
        Err(err) => {
            error!("{err}");
            debug!("{err:?}");
            RunStatus::Failure
        }
    }
}

async fn execute(
    runner: &impl CommandRunner,
    packages: &impl PackageCommandHandler,
    request: &Request,
) -> anyhow::Result<RunStatus> {
    if !verify_git_installed(runner).await {
        anyhow::bail!("Git not installed");
    }
    ensure_clean_working_tree(runner).await?;
    let setup = ensure_git_flow_configured(runner).await?;
    debug!(
        steps = setup.records().len(),
        warnings = setup.warnings().count(),
        "Repository setup finished"
    );

    if !request.package_args.is_empty() && packages.handle(&request.package_args).await? {
        return Ok(RunStatus::Success);
    }

    let outcome = match request.pr_flow {
        Some(PrFlow::CurrentBranch) => pr::create_from_current_branch(runner).await?,
        Some(PrFlow::FinishedBranch) => pr::create_for_finished_branch(runner).await?,
        None => {
            if !request.package_args.is_empty() {
                error!("Unknown command: {}", request.package_args.join(" "));
            }
            error!("Nothing to do. Run with -p, pr-create or pr-finish (see --help).");
            return Ok(RunStatus::Failure);
        }
    };

    match outcome {
        PrOutcome::Created(urls) => info!("Created {} pull request(s)", urls.len()),
        PrOutcome::Skipped(reason) => debug!("No pull request created: {reason}"),
    }
    Ok(RunStatus::Success)
}

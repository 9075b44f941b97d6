//! Source branch resolution.

use lazy_regex::regex;
use tracing::{debug, info};

use super::error::{PrError, Result};
use crate::shared::process::CommandRunner;

/// How the branch to open a pull request for is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// The branch currently checked out.
    Direct,
    /// The git-flow branch named by the last reflog entry, or failing that,
    /// by the most recent merge commit.
    History,
}

/// Returns `Ok(None)` when no candidate branch can be found.
pub async fn resolve_branch(
    runner: &impl CommandRunner,
    strategy: ResolveStrategy,
) -> Result<Option<String>> {
    let branch = match strategy {
        ResolveStrategy::Direct => {
            let current = runner
                .run_git(&["rev-parse", "--abbrev-ref", "HEAD"])
                .await
                .map_err(PrError::Resolve)?;
            Some(current.trim().to_string()).filter(|b| !b.is_empty())
        }
        ResolveStrategy::History => resolve_from_history(runner).await?,
    };

    match &branch {
        Some(name) => info!("Found branch name: {name}"),
        None => info!("No branch name found"),
    }
    Ok(branch)
}

async fn resolve_from_history(runner: &impl CommandRunner) -> Result<Option<String>> {
    let reflog = runner
        .run_git(&["reflog", "-1"])
        .await
        .map_err(PrError::Resolve)?;
    debug!("Reflog output: {reflog}");
    if let Some(branch) = extract_flow_branch(&reflog) {
        return Ok(Some(branch));
    }

    let merges = runner
        .run_git(&["log", "-1", "--merges", "--oneline"])
        .await
        .map_err(PrError::Resolve)?;
    debug!("Recent merges: {merges}");
    Ok(extract_flow_branch(&merges))
}

/// First git-flow branch name (`feature/`, `hotfix/`, `bugfix/`, `release/`)
/// mentioned in `text`. Colons, whitespace and quotes end the name.
pub fn extract_flow_branch(text: &str) -> Option<String> {
    regex!(r#"(?:feature|hotfix|bugfix|release)/[^:\s'"]+"#)
        .find(text)
        .map(|m| m.as_str().to_string())
}

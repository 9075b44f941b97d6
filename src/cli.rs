use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::app::{PrFlow, Request};
use crate::commands::config::ConfigCommands;
use crate::shared::logging::LogFormat;

/// Keeps a repository on git-flow and opens GitHub pull requests for its branches.
#[derive(Parser, Debug)]
#[command(name = "gitflow-pr", bin_name = "gfp", version, about, allow_external_subcommands = true)]
pub struct Cli {
    /// Publish the current feature branch and open a PR into dev (same as `pr-create`)
    #[arg(short = 'p')]
    pub pr: bool,

    /// Log at debug level
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Read configuration from PATH instead of ~/.config/gitflow-pr
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Publish the current feature branch and open a PR into dev
    PrCreate,

    /// Open PRs for the git-flow branch that was just finished
    PrFinish,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Package commands, forwarded to the package command handler
    #[command(external_subcommand)]
    Package(Vec<String>),
}

impl Cli {
    /// What the repository run should do once git-flow is in place.
    /// `-p` takes precedence over `pr-finish`.
    pub fn request(&self) -> Request {
        let package_args = match &self.command {
            Some(Commands::Package(args)) => args.clone(),
            _ => Vec::new(),
        };

        let pr_flow = match &self.command {
            _ if self.pr => Some(PrFlow::CurrentBranch),
            Some(Commands::PrCreate) => Some(PrFlow::CurrentBranch),
            Some(Commands::PrFinish) => Some(PrFlow::FinishedBranch),
            _ => None,
        };

        Request {
            package_args,
            pr_flow,
        }
    }
}

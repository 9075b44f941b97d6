//! Git operations through the `git` CLI.
//!
//! Every function takes the [`CommandRunner`](crate::shared::process::CommandRunner)
//! it should use, so nothing here spawns processes on its own.

mod branch;
pub mod branch_name;
mod error;
mod flow_config;
mod repo;

pub use branch::has_commits;
pub use flow_config::ensure_git_flow_configured;
pub use repo::{ensure_clean_working_tree, verify_git_installed};

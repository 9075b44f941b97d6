//! GitHub operations through the authenticated `gh` CLI.

mod auth;
mod pr;

pub use auth::{AuthError, ensure_authenticated};
pub use pr::create_pr;

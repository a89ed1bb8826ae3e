//! Shellpack CLI - dev server and production build settings for desktop-shell frontends.
//!
//! The binary resolves a [`BuildConfiguration`](shellpack_config::BuildConfiguration)
//! from the project config and the environment, then either prints it, checks
//! the dev server ports, verifies manual chunks against `package.json`, or
//! lists which diagnostic calls the minifier will strip.
//!
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and summaries
//! - `commands` - one module per subcommand
//! - `dev` - file watcher for `shellpack dev --watch`

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};

//! Command implementations.
//!
//! - [`config`] - print the resolved configuration
//! - [`dev`] - check the dev server binding, optionally watch
//! - [`build`] - verify the production build against the dependency graph
//! - [`check`] - validate config and scan sources for diagnostic calls
//!
//! Each module exposes an `execute` taking the shared [`Context`] and the
//! command's parsed arguments.

pub mod build;
pub mod check;
pub mod config;
pub mod dev;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use config::execute as config_execute;
pub use dev::execute as dev_execute;
pub use utils::{Context, Overrides};

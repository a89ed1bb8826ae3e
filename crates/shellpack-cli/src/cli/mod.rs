//! Command-line interface definition.
//!
//! - `shellpack config` - print the resolved configuration
//! - `shellpack dev` - resolve and check the dev server binding
//! - `shellpack build` - resolve the production build and verify chunks
//! - `shellpack check` - validate config and list diagnostic calls

mod commands;
pub mod enums;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, ConfigArgs, DevArgs};
pub use enums::*;

/// Shellpack - dev server and production build settings for desktop-shell frontends
#[derive(Parser, Debug)]
#[command(
    name = "shellpack",
    version,
    about = "Dev server and production build settings for desktop-shell frontends",
    long_about = "Shellpack resolves how a web frontend is served while the desktop shell\n\
                  develops against it (fixed port, HMR for remote devices) and how it is\n\
                  packaged (terser, diagnostic stripping, manual chunks)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to load instead of searching the project root
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

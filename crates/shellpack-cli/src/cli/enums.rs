//! Value enums for CLI arguments.

use clap::ValueEnum;

/// Output shape for `shellpack config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// camelCase configuration model
    #[default]
    Json,
    /// Options object for the Vite runtime
    Vite,
}

/// Invocation whose settings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Dev server binding only
    Dev,
    /// Production build only
    Build,
}

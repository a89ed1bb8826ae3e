use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::enums::{Mode, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration as JSON
    ///
    /// Reads shellpack.toml, SHELLPACK_* variables and TAURI_DEV_HOST, and
    /// writes the result to stdout.
    Config(ConfigArgs),

    /// Resolve the dev server binding and check its ports
    ///
    /// Fails if the port (or the HMR port) is taken; a different port is never
    /// chosen because the desktop shell loads a fixed URL.
    Dev(DevArgs),

    /// Resolve the production build and verify manual chunks
    ///
    /// Every chunk module must resolve through package.json.
    Build(BuildArgs),

    /// Validate the project config and list diagnostic calls
    ///
    /// Shows which console/debugger calls the minifier will strip and which it
    /// has to keep.
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Output shape
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Limit output to one invocation's settings
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Override the dev server port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct DevArgs {
    /// Override the dev server port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Skip probing the dev server and HMR ports
    #[arg(long)]
    pub skip_port_check: bool,

    /// Watch the project and log changes that pass the watch filter
    #[arg(short, long)]
    pub watch: bool,

    /// Debounce window for repeated changes to one file
    #[arg(long, default_value = "100", value_name = "MS", requires = "watch")]
    pub debounce_ms: u64,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// package.json to resolve chunk modules against
    ///
    /// Defaults to the nearest package.json at or above the project root.
    #[arg(long, value_name = "FILE")]
    pub package: Option<PathBuf>,

    /// Compute compressed sizes in the bundler report
    #[arg(long)]
    pub report_compressed_size: bool,
}

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Files or directories to scan (defaults to the project root)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Fail when a diagnostic call is kept or drops side-effecting arguments
    #[arg(long)]
    pub strict: bool,
}

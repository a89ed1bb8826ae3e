//! Shellpack CLI entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use miette::Result;
use shellpack_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match commands::Context::from_cli(&args) {
        Ok(ctx) => match args.command {
            cli::Command::Config(config_args) => commands::config_execute(&ctx, config_args),
            cli::Command::Dev(dev_args) => commands::dev_execute(&ctx, dev_args).await,
            cli::Command::Build(build_args) => commands::build_execute(&ctx, build_args),
            cli::Command::Check(check_args) => commands::check_execute(&ctx, check_args),
        },
        Err(err) => Err(err),
    };

    result.map_err(error::cli_error_to_miette)
}

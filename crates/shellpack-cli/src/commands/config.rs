//! Config command: print the resolved configuration to stdout.

use serde_json::{Map, Value};
use shellpack_config::to_vite_config;

use crate::cli::{ConfigArgs, Mode, OutputFormat};
use crate::commands::utils::{Context, Overrides};
use crate::error::Result;

/// Resolve the project against the process environment and print it as JSON.
///
/// Both output shapes keep `clearScreen`, `server` and `build` at the top
/// level, so `--mode` filters them the same way.
pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    let overrides = Overrides {
        port: args.port,
        ..Overrides::default()
    };
    let config = ctx.resolve(&overrides)?;

    let value = match args.format {
        OutputFormat::Json => config.to_value()?,
        OutputFormat::Vite => to_vite_config(&config),
    };
    let value = match args.mode {
        Some(mode) => select_mode(value, mode),
        None => value,
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Keep only the settings `mode` uses.
fn select_mode(value: Value, mode: Mode) -> Value {
    let section = match mode {
        Mode::Dev => "server",
        Mode::Build => "build",
    };
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key == section || key == "clearScreen")
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

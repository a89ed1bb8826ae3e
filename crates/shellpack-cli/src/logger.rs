//! Logging setup for the shellpack CLI.
//!
//! Logs go to stderr so `shellpack config` can pipe JSON from stdout.
//!
//! Level selection, first match wins:
//! 1. `--verbose`: debug for shellpack crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for shellpack crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "shellpack=debug,shellpack_config=debug,shellpack_graph=debug,shellpack_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "shellpack=info,shellpack_config=info,shellpack_graph=info,shellpack_cli=info";

pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    // A second init (tests calling into main paths) is harmless.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

/// Whether stderr should get ANSI colors.
///
/// `NO_COLOR` disables, `FORCE_COLOR` enables, otherwise the terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

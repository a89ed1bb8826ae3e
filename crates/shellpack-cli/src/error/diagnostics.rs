//! Miette report conversion for CLI errors.

use miette::{MietteDiagnostic, Report};

use crate::error::CliError;

/// Convert a [`CliError`] into a report with its hint as help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    let code = match &err {
        CliError::Config(_) => "shellpack::config",
        CliError::Graph(shellpack_graph::GraphError::ModuleResolution { .. }) => {
            "shellpack::module_resolution"
        }
        CliError::Graph(_) => "shellpack::graph",
        CliError::Watch(_) => "shellpack::watch",
        _ => "shellpack",
    };

    let mut diagnostic = MietteDiagnostic::new(err.to_string()).with_code(code);
    if let Some(hint) = err.hint() {
        diagnostic = diagnostic.with_help(hint);
    }
    Report::new(diagnostic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_help() {
        let err = CliError::Config(shellpack_config::ConfigError::PortUnavailable {
            host: "127.0.0.1".to_string(),
            port: 1420,
        });
        let report = cli_error_to_miette(err);
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("1420"));
        assert_eq!(report.code().map(|c| c.to_string()).as_deref(), Some("shellpack::config"));
    }

    #[test]
    fn report_without_hint() {
        let report = cli_error_to_miette(CliError::Custom("boom".to_string()));
        assert_eq!(report.to_string(), "boom");
        assert!(report.help().is_none());
    }
}

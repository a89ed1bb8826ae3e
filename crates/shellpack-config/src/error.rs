//! Error types for configuration resolution and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Strict port binding
    #[error("port {port} on {host} is already in use and strict port binding is enabled")]
    PortUnavailable { host: String, port: u16 },

    #[error("failed to probe {host}:{port}: {source}")]
    PortProbe {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    // Dev server declarations
    #[error("HMR port {hmr_port} collides with dev server port {port}")]
    PortCollision { port: u16, hmr_port: u16 },

    #[error("dev server port {0} leaves no room for the HMR port")]
    HmrPortOverflow(u16),

    #[error("invalid watch exclusion glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    // Config parsing/loading errors
    #[error("config not found in {0}")]
    NotFound(PathBuf),

    #[error("invalid config value for '{field}'{}", hint.as_deref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation errors
    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Actionable hint for the operator, when one exists.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::PortUnavailable { port, .. } => Some(format!(
                "Stop the process holding port {port}, or set `port` in shellpack.toml. \
                 The desktop shell expects this exact port, so no fallback port is tried."
            )),
            Self::PortCollision { .. } | Self::HmrPortOverflow(_) => {
                Some("Choose a dev server port below 65535; HMR uses the next port up".to_string())
            }
            Self::InvalidGlob { .. } => {
                Some("Check `foreign_dirs` in shellpack.toml for unbalanced brackets or braces".to_string())
            }
            Self::SchemaValidation { hint, .. } => hint.clone(),
            _ => None,
        }
    }
}

//! Error handling for the shellpack CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`; commands add
//! context with [`ResultExt`]. `main` turns the final error into a miette
//! report, see [`diagnostics`].
//!
//! ```rust,no_run
//! use shellpack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Pass --package <path> to point at another manifest")
//! }
//! ```

pub mod diagnostics;

use std::path::PathBuf;

use thiserror::Error;

pub use diagnostics::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Project config loading, validation or binding failed.
    #[error("Configuration error: {0}")]
    Config(#[from] shellpack_config::ConfigError),

    /// Chunk resolution or source scanning failed.
    #[error("{0}")]
    Graph(#[from] shellpack_graph::GraphError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    Hinted { message: String, hint: String },

    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Actionable hint carried by the error or its source.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.hint(),
            Self::Graph(err) => err.hint(),
            Self::FileNotFound(_) => Some("Check the path, or run from the project root".to_string()),
            Self::Hinted { hint, .. } => Some(hint.clone()),
            _ => None,
        }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Attach a hint shown under the error.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Hinted {
                message: err.to_string(),
                hint: hint.to_string(),
            }
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err.hint() {
                Some(hint) => CliError::Hinted {
                    message: format!("{msg}: {err}"),
                    hint,
                },
                None => CliError::Custom(format!("{msg}: {err}")),
            }
        })
    }
}

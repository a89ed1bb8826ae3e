//! Error types for dependency resolution and source scanning.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A manual chunk names a module the dependency graph cannot resolve.
    #[error("chunk '{chunk}' references module '{module}', which is not in the dependency graph")]
    ModuleResolution { chunk: String, module: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid package manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("unsupported source file: {0}")]
    UnsupportedSource(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ModuleResolution { module, .. } => Some(format!(
                "Add '{}' to package.json dependencies, or remove it from [chunks] in shellpack.toml",
                crate::package_json::extract_package_name(module)
            )),
            Self::UnsupportedSource(_) => {
                Some("Only .js, .mjs, .cjs, .jsx, .ts, .mts, .cts, .tsx and .vue files are scanned".to_string())
            }
            _ => None,
        }
    }
}

//! Project-level declarations read from `shellpack.toml`.

use serde::{Deserialize, Serialize};

use crate::build::{ChunkingStrategy, DEFAULT_PURE_FUNCTIONS};
use crate::server::DEFAULT_DEV_PORT;
use crate::watch::DEFAULT_FOREIGN_DIRS;

/// What a project may declare about its build.
///
/// Everything has a default, so an empty file (or no file) is a valid
/// project. Console and debugger stripping are not listed here: packaged
/// builds always drop them.
///
/// ```toml
/// port = 1420
/// foreign_dirs = ["**/src-tauri/**"]
/// secure_hmr = false
/// pure_functions = ["console.log", "console.info"]
/// report_compressed_size = false
///
/// [chunks]
/// vendor = ["vue"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Port the desktop shell loads the frontend from.
    pub port: u16,

    /// Root-relative globs for native source trees the watcher ignores.
    pub foreign_dirs: Vec<String>,

    /// Serve HMR over `wss` when the dev server is externally reachable.
    pub secure_hmr: bool,

    /// Manual chunk groups.
    pub chunks: ChunkingStrategy,

    /// Calls the minifier may drop when their result is unused.
    pub pure_functions: Vec<String>,

    pub report_compressed_size: bool,

    /// Let the dev server runtime clear the terminal. Off so native compiler
    /// output stays visible.
    pub clear_screen: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_DEV_PORT,
            foreign_dirs: DEFAULT_FOREIGN_DIRS.iter().map(|s| s.to_string()).collect(),
            secure_hmr: false,
            chunks: ChunkingStrategy::default(),
            pure_functions: DEFAULT_PURE_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
            report_compressed_size: false,
            clear_screen: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: ProjectConfig = toml::from_str(
            r#"
            port = 3000
            secure_hmr = true

            [chunks]
            vendor = ["vue", "vue-router"]
            charts = ["echarts"]
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 3000);
        assert!(config.secure_hmr);
        assert_eq!(config.foreign_dirs, ["**/src-tauri/**"]);
        assert_eq!(config.chunks.chunk_for("echarts"), Some("charts"));
        assert!(!config.clear_screen);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config: ProjectConfig = toml::from_str("future_option = 1").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }
}

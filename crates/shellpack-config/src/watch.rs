//! Watch exclusions for foreign source trees.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{ConfigError, Result};

/// Native shell sources excluded from watching unless the project overrides them.
pub const DEFAULT_FOREIGN_DIRS: &[&str] = &["**/src-tauri/**"];

/// Compiled set of root-relative exclusion globs.
///
/// Patterns that match nothing on disk are fine; the filter never touches the
/// filesystem.
#[derive(Debug, Clone)]
pub struct WatchFilter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl Default for WatchFilter {
    fn default() -> Self {
        // The default patterns are static and known to compile.
        Self {
            patterns: DEFAULT_FOREIGN_DIRS.iter().map(|p| p.to_string()).collect(),
            set: compile(DEFAULT_FOREIGN_DIRS.iter().copied()).unwrap_or_else(|_| GlobSet::empty()),
        }
    }
}

impl WatchFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let set = compile(patterns.iter().map(String::as_str))?;
        Ok(Self { patterns, set })
    }

    /// Exclusion list in declaration order, as the dev server receives it.
    pub fn exclusions(&self) -> Vec<String> {
        self.patterns.clone()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a root-relative path falls under an excluded tree.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.set.is_match(path)
    }
}

fn compile<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| ConfigError::InvalidGlob {
            pattern: pattern.to_string(),
            message: err.kind().to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|err| ConfigError::InvalidGlob {
        pattern: err.glob().unwrap_or_default().to_string(),
        message: err.kind().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_native_tree() {
        let filter = WatchFilter::default();
        assert_eq!(filter.exclusions(), vec!["**/src-tauri/**".to_string()]);
        assert!(filter.is_excluded(Path::new("src-tauri/src/main.rs")));
        assert!(filter.is_excluded(Path::new("apps/desktop/src-tauri/tauri.conf.json")));
        assert!(!filter.is_excluded(Path::new("src/App.vue")));
        assert!(!filter.is_excluded(Path::new("src/tauri-bridge.ts")));
    }

    #[test]
    fn custom_patterns_keep_order() {
        let filter = WatchFilter::new(["**/native/**", "**/src-tauri/**"]).unwrap();
        assert_eq!(filter.patterns(), ["**/native/**", "**/src-tauri/**"]);
        assert!(filter.is_excluded(Path::new("native/lib.rs")));
    }

    #[test]
    fn empty_filter_excludes_nothing() {
        let filter = WatchFilter::new(Vec::<String>::new()).unwrap();
        assert!(filter.exclusions().is_empty());
        assert!(!filter.is_excluded(Path::new("src-tauri/main.rs")));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = WatchFilter::new(["**/src-{tauri/**"]).unwrap_err();
        match err {
            ConfigError::InvalidGlob { pattern, .. } => assert_eq!(pattern, "**/src-{tauri/**"),
            other => panic!("expected InvalidGlob, got {other:?}"),
        }
    }
}

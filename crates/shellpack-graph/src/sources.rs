//! Source file collection for scanning.

use std::path::{Path, PathBuf};

use shellpack_config::WatchFilter;
use walkdir::{DirEntry, WalkDir};

/// Extensions the diagnostic scanner understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx", "vue"];

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "target"];

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        && !path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".d.ts"))
}

/// Collect scannable sources under `root` in a stable order.
///
/// Paths matching `exclude` (tested root-relative) are skipped along with
/// dependency, output and hidden directories. A file `root` is returned as is
/// when it is a source file.
pub fn collect_sources(root: &Path, exclude: Option<&WatchFilter>) -> Vec<PathBuf> {
    if root.is_file() {
        return if is_source_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let excluded = |entry: &DirEntry| {
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        exclude.is_some_and(|filter| {
            // Directory globs like `**/src-tauri/**` match children, not the directory itself.
            filter.is_excluded(relative) || filter.is_excluded(&relative.join("_"))
        })
    };

    let mut sources: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !(is_skipped_dir(entry) || excluded(entry)))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_source_file(entry.path()))
        .map(DirEntry::into_path)
        .collect();

    sources.sort();
    sources
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn collects_sources_and_skips_noise() {
        let dir = TempDir::new().unwrap();
        for file in [
            "src/main.ts",
            "src/App.vue",
            "src/types.d.ts",
            "src/styles.css",
            "node_modules/vue/index.js",
            "dist/assets/index.js",
            ".cache/x.js",
            "src-tauri/scripts/build.js",
        ] {
            touch(dir.path(), file);
        }

        let filter = WatchFilter::default();
        let sources = collect_sources(dir.path(), Some(&filter));
        let relative: Vec<_> = sources
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(relative, ["src/App.vue", "src/main.ts"]);
    }

    #[test]
    fn without_filter_foreign_dirs_are_scanned() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src-tauri/scripts/build.js");
        assert_eq!(collect_sources(dir.path(), None).len(), 1);
    }

    #[test]
    fn single_file_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.js");
        touch(dir.path(), "README.md");
        assert_eq!(collect_sources(&dir.path().join("main.js"), None).len(), 1);
        assert!(collect_sources(&dir.path().join("README.md"), None).is_empty());
    }
}

//! `package.json` loading.
//!
//! Only the dependency tables matter here; scripts, engines and the rest are
//! ignored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Manifests larger than this are rejected unread (10MB).
const MAX_PACKAGE_JSON_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageJson {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: HashMap<String, String>,
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: HashMap<String, String>,
    /// File this was loaded from. Empty for manifests parsed from a string.
    #[serde(skip)]
    pub path: PathBuf,
}

impl PackageJson {
    /// Load a manifest from disk.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shellpack_graph::PackageJson;
    /// use std::path::Path;
    ///
    /// let pkg = PackageJson::from_path(Path::new("package.json")).unwrap();
    /// println!("{:?}", pkg.name);
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_PACKAGE_JSON_SIZE {
            return Err(GraphError::InvalidManifest {
                path: path.to_path_buf(),
                message: format!(
                    "exceeds maximum size of {}MB",
                    MAX_PACKAGE_JSON_SIZE / 1024 / 1024
                ),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut pkg = Self::parse(&content).map_err(|e| GraphError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        pkg.path = path.to_path_buf();

        tracing::debug!(
            path = %path.display(),
            name = pkg.name.as_deref().unwrap_or("<unnamed>"),
            "loaded package manifest"
        );
        Ok(pkg)
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Search `start_dir` and its ancestors for a manifest.
    pub fn find_from_dir(start_dir: &Path) -> Result<Self> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            let candidate = dir.join("package.json");
            if candidate.is_file() {
                return Self::from_path(&candidate);
            }
            current = dir.parent();
        }

        Err(GraphError::InvalidManifest {
            path: start_dir.join("package.json"),
            message: "no package.json found in directory tree".to_string(),
        })
    }

    pub fn get_dependencies(&self, dep_type: DependencyType) -> &HashMap<String, String> {
        match dep_type {
            DependencyType::Production => &self.dependencies,
            DependencyType::Development => &self.dev_dependencies,
            DependencyType::Peer => &self.peer_dependencies,
            DependencyType::Optional => &self.optional_dependencies,
        }
    }

    /// Every declared package with the first table that declares it,
    /// production first.
    pub fn declared_packages(&self) -> impl Iterator<Item = (&str, DependencyType)> {
        DependencyType::ALL.into_iter().flat_map(move |dep_type| {
            self.get_dependencies(dep_type)
                .keys()
                .map(move |name| (name.as_str(), dep_type))
        })
    }
}

/// Dependency table in `package.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    Production,
    Development,
    Peer,
    Optional,
}

impl DependencyType {
    /// Lookup order when a package appears in several tables.
    pub const ALL: [Self; 4] = [
        Self::Production,
        Self::Peer,
        Self::Optional,
        Self::Development,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "dependencies",
            Self::Development => "devDependencies",
            Self::Peer => "peerDependencies",
            Self::Optional => "optionalDependencies",
        }
    }
}

/// Extract the package name from a bare import specifier.
///
/// - `@foo/bar/baz` -> `@foo/bar`
/// - `lodash/fp` -> `lodash`
///
/// ```
/// # use shellpack_graph::extract_package_name;
/// assert_eq!(extract_package_name("@vue/runtime-dom/dist/x.js"), "@vue/runtime-dom");
/// assert_eq!(extract_package_name("vue"), "vue");
/// ```
pub fn extract_package_name(specifier: &str) -> &str {
    if let Some(scoped) = specifier.strip_prefix('@') {
        return match scoped.find('/') {
            Some(first_slash) => match scoped[first_slash + 1..].find('/') {
                Some(second_slash) => &specifier[..first_slash + second_slash + 2],
                None => specifier,
            },
            None => specifier,
        };
    }

    match specifier.find('/') {
        Some(slash) => &specifier[..slash],
        None => specifier,
    }
}

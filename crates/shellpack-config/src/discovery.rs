//! File-based project config discovery.
//!
//! Sources are layered with figment, later ones winning:
//! defaults, then `shellpack.toml` (or the `shellpack` field of
//! `package.json`), then `SHELLPACK_*` environment variables, then whatever
//! overrides the caller passes in.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;

/// Project config file name.
pub const CONFIG_FILE: &str = "shellpack.toml";

/// Field read from `package.json` when no config file exists.
pub const PACKAGE_JSON_FIELD: &str = "shellpack";

/// Prefix for environment overrides, e.g. `SHELLPACK_PORT=1430`.
pub const ENV_PREFIX: &str = "SHELLPACK_";

/// Finds and loads a [`ProjectConfig`].
///
/// # Example
///
/// ```no_run
/// use shellpack_config::ConfigDiscovery;
///
/// let project = ConfigDiscovery::new(".").load().unwrap();
/// assert!(project.port > 0);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
    file: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            file: None,
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Load from `path` instead of searching the root. The file must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skip the environment layer.
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config source in the root directory.
    ///
    /// Searches in this order:
    /// 1. `shellpack.toml`
    /// 2. `package.json` with a non-null `shellpack` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load with no caller overrides.
    pub fn load(&self) -> Result<ProjectConfig> {
        self.figment()?.extract().map_err(from_figment)
    }

    /// Load and apply `overrides` on top of every other layer.
    ///
    /// `overrides` should serialize only the keys it sets, typically a struct
    /// of `Option`s with `skip_serializing_if`.
    pub fn load_with<T: Serialize>(&self, overrides: &T) -> Result<ProjectConfig> {
        self.figment()?
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(from_figment)
    }

    /// The config source in effect, if any.
    pub fn source(&self) -> Result<Option<PathBuf>> {
        match &self.file {
            Some(path) if path.is_file() => Ok(Some(path.clone())),
            Some(path) => Err(ConfigError::NotFound(path.clone())),
            None => Ok(self.find()),
        }
    }

    fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(defaults_layer()));

        match self.source()? {
            Some(path) if is_package_json(&path) => {
                figment = figment.merge(Serialized::defaults(package_json_field(&path)?));
            }
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading project config");
                figment = figment.merge(Toml::file(path));
            }
            None => tracing::debug!(root = %self.root.display(), "no project config, using defaults"),
        }

        if let Some(prefix) = &self.env_prefix {
            figment = figment.merge(Env::prefixed(prefix));
        }

        Ok(figment)
    }
}

/// Defaults without `chunks`.
///
/// Figment merges tables key by key, so a default `vendor` chunk would leak
/// into every declared `[chunks]` table. Left out here, serde fills it in only
/// when the project declares no chunks at all.
fn defaults_layer() -> Value {
    let mut defaults = serde_json::to_value(ProjectConfig::default()).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut defaults {
        map.remove("chunks");
    }
    defaults
}

fn is_package_json(path: &Path) -> bool {
    path.file_name() == Some(std::ffi::OsStr::new("package.json"))
}

fn package_json_field(path: &Path) -> Result<Value> {
    tracing::debug!(path = %path.display(), "loading project config from package.json");
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })?;

    match parsed.get(PACKAGE_JSON_FIELD) {
        Some(Value::Object(map)) => Ok(Value::Object(map.clone())),
        Some(_) => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("The 'shellpack' field in package.json must be an object".to_string()),
        }),
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("Add a 'shellpack' field to your package.json".to_string()),
        }),
    }
}

fn from_figment(err: figment::Error) -> ConfigError {
    let field = if err.path.is_empty() {
        "configuration".to_string()
    } else {
        err.path.join(".")
    };
    ConfigError::InvalidValue {
        field,
        hint: Some(err.kind.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path()).without_env();
        assert_eq!(discovery.find(), None);
        assert_eq!(discovery.load().unwrap(), ProjectConfig::default());
    }

    #[test]
    fn declared_chunks_replace_default_vendor_chunk() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[chunks]\ncharts = [\"echarts\"]\n").unwrap();
        let config = ConfigDiscovery::new(dir.path()).without_env().load().unwrap();
        let names: Vec<_> = config.chunks.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["charts"]);
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name":"app","shellpack":null}"#).unwrap();
        assert_eq!(ConfigDiscovery::new(dir.path()).find(), None);
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("custom.toml");
        let err = ConfigDiscovery::new(dir.path())
            .with_file(&missing)
            .without_env()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }

    #[test]
    fn wrong_type_names_the_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "port = \"fast\"").unwrap();
        let err = ConfigDiscovery::new(dir.path()).without_env().load().unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "port"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}

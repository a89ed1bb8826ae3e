//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;
use shellpack_config::{BuildConfiguration, ConfigDiscovery, ProjectConfig};

use crate::cli::Cli;
use crate::error::{CliError, Result, ResultExt};

/// Flags every command shares.
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub config: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base = std::env::current_dir()?;
        let cwd = match &cli.cwd {
            Some(dir) => resolve_path(dir, &base),
            None => base,
        };
        if !cwd.is_dir() {
            return Err(CliError::FileNotFound(cwd));
        }

        let config = cli.config.as_deref().map(|path| resolve_path(path, &cwd));
        Ok(Self { cwd, config })
    }

    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            config: None,
        }
    }

    fn discovery(&self) -> ConfigDiscovery {
        let discovery = ConfigDiscovery::new(&self.cwd);
        match &self.config {
            Some(path) => discovery.with_file(path),
            None => discovery,
        }
    }

    /// Load the project config with CLI overrides applied last.
    pub fn load_project(&self, overrides: &Overrides) -> Result<ProjectConfig> {
        let discovery = self.discovery();
        if let Some(source) = discovery.source()? {
            tracing::debug!(path = %source.display(), "project config");
        }
        discovery
            .load_with(overrides)
            .context("Failed to load project config")
    }

    /// Load the project and resolve it against the process environment.
    pub fn resolve(&self, overrides: &Overrides) -> Result<BuildConfiguration> {
        let project = self.load_project(overrides)?;
        Ok(BuildConfiguration::from_env(&project)?)
    }
}

/// Project settings a flag can override. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_compressed_size: Option<bool>,
}

/// Join `path` onto `cwd` unless it is already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

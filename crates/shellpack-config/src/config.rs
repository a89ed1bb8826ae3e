//! The root configuration handed to the dev server and bundler runtime.

use serde::{Deserialize, Serialize};

use crate::build::{ProductionBuildConfig, ProductionOptimizer};
use crate::env::{Environment, ProcessEnv, resolve_reachability_host};
use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;
use crate::server::{DevServerBinder, DevServerConfig};
use crate::validation::validate_schema;
use crate::watch::WatchFilter;

/// Everything one invocation needs, built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub clear_screen: bool,
    pub server: DevServerConfig,
    pub build: ProductionBuildConfig,
}

impl BuildConfiguration {
    /// Resolve against `project` and an explicit environment.
    ///
    /// The same inputs always produce the same configuration.
    pub fn resolve(project: &ProjectConfig, env: &impl Environment) -> Result<Self> {
        validate_schema(project)?;

        let filter = WatchFilter::new(project.foreign_dirs.iter().cloned())?;
        let server = DevServerBinder::new(project.port)
            .with_secure_hmr(project.secure_hmr)
            .bind(resolve_reachability_host(env), filter.exclusions())?;
        let build = ProductionOptimizer::from_project(project).optimize();

        Ok(Self {
            clear_screen: project.clear_screen,
            server,
            build,
        })
    }

    /// Resolve against the live process environment.
    pub fn from_env(project: &ProjectConfig) -> Result<Self> {
        Self::resolve(project, &ProcessEnv)
    }

    /// Recompile the watch exclusions for path matching.
    pub fn watch_filter(&self) -> Result<WatchFilter> {
        WatchFilter::new(self.server.watch_exclusions.iter().cloned())
    }

    /// Check a configuration that did not come from [`resolve`](Self::resolve).
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.build.validate()
    }

    /// camelCase JSON form.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(format!("serialization failed: {e}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{DEV_HOST_VAR, EnvSnapshot};
    use serde_json::json;

    #[test]
    fn local_scenario() {
        let config =
            BuildConfiguration::resolve(&ProjectConfig::default(), &EnvSnapshot::new()).unwrap();
        let value = config.to_value().unwrap();

        assert_eq!(value["clearScreen"], false);
        assert_eq!(
            value["server"],
            json!({
                "port": 1420,
                "strictPort": true,
                "host": false,
                "watchExclusions": ["**/src-tauri/**"]
            })
        );
    }

    #[test]
    fn reachable_scenario() {
        let env = EnvSnapshot::new().with(DEV_HOST_VAR, "192.168.1.50");
        let config = BuildConfiguration::resolve(&ProjectConfig::default(), &env).unwrap();
        let value = config.to_value().unwrap();

        assert_eq!(value["server"]["host"], "192.168.1.50");
        assert_eq!(
            value["server"]["hmr"],
            json!({ "protocol": "ws", "host": "192.168.1.50", "port": 1421 })
        );
    }

    #[test]
    fn invalid_project_is_rejected_before_binding() {
        let project = ProjectConfig {
            port: 0,
            ..ProjectConfig::default()
        };
        assert!(matches!(
            BuildConfiguration::resolve(&project, &EnvSnapshot::new()).unwrap_err(),
            ConfigError::SchemaValidation { .. }
        ));
    }

    #[test]
    fn project_settings_flow_through() {
        let project = ProjectConfig {
            port: 5173,
            secure_hmr: true,
            report_compressed_size: true,
            clear_screen: true,
            ..ProjectConfig::default()
        };
        let env = EnvSnapshot::new().with(DEV_HOST_VAR, "dev.local");
        let config = BuildConfiguration::resolve(&project, &env).unwrap();

        assert!(config.clear_screen);
        assert_eq!(config.server.port, 5173);
        assert_eq!(config.server.hmr.as_ref().map(|h| h.url()).as_deref(), Some("wss://dev.local:5174"));
        assert!(config.build.report_compressed_size);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn round_trips_through_json() {
        let env = EnvSnapshot::new().with(DEV_HOST_VAR, "10.0.0.7");
        let config = BuildConfiguration::resolve(&ProjectConfig::default(), &env).unwrap();
        let parsed: BuildConfiguration = serde_json::from_value(config.to_value().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn watch_filter_matches_exclusions() {
        let config =
            BuildConfiguration::resolve(&ProjectConfig::default(), &EnvSnapshot::new()).unwrap();
        let filter = config.watch_filter().unwrap();
        assert!(filter.is_excluded(std::path::Path::new("src-tauri/Cargo.toml")));
    }
}

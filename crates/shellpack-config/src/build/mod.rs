//! Production build configuration.
//!
//! [`ProductionOptimizer`] assembles the settings for a packaging run: the
//! minifier, what it strips, how modules are grouped into chunks and whether
//! compressed sizes are reported.

mod chunks;
mod compress;
mod minify;
mod report;

pub use chunks::ChunkingStrategy;
pub use compress::{CompressionOptions, DEFAULT_PURE_FUNCTIONS};
pub use minify::MinifyStrategy;
pub use report::CompressionReporter;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;

/// Settings for a packaging invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionBuildConfig {
    pub minify: MinifyStrategy,
    pub compression_options: CompressionOptions,
    pub chunking_strategy: ChunkingStrategy,
    pub report_compressed_size: bool,
}

impl Default for ProductionBuildConfig {
    fn default() -> Self {
        ProductionOptimizer::new().optimize()
    }
}

impl ProductionBuildConfig {
    /// Reject settings that would ship diagnostics or skip the thorough pass.
    pub fn validate(&self) -> Result<()> {
        if !self.minify.is_thorough() {
            return Err(ConfigError::InvalidValue {
                field: "minify".to_string(),
                hint: Some(format!(
                    "'{}' ignores compression options; packaged builds require terser",
                    self.minify
                )),
            });
        }
        if !self.compression_options.drop_console || !self.compression_options.drop_debugger {
            return Err(ConfigError::InvalidValue {
                field: "compressionOptions".to_string(),
                hint: Some("dropConsole and dropDebugger must stay enabled".to_string()),
            });
        }
        Ok(())
    }

    pub fn reporter(&self) -> CompressionReporter {
        CompressionReporter::new(self.report_compressed_size)
    }
}

/// Builder for [`ProductionBuildConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProductionOptimizer {
    chunks: ChunkingStrategy,
    compression: CompressionOptions,
    reporter: CompressionReporter,
}

impl ProductionOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_project(project: &ProjectConfig) -> Self {
        Self::new()
            .with_chunks(project.chunks.clone())
            .with_pure_functions(project.pure_functions.iter().cloned())
            .with_compressed_size_report(project.report_compressed_size)
    }

    pub fn with_chunks(mut self, chunks: ChunkingStrategy) -> Self {
        self.chunks = chunks;
        self
    }

    pub fn with_pure_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compression = CompressionOptions::with_pure_functions(names);
        self
    }

    pub fn with_compressed_size_report(mut self, enabled: bool) -> Self {
        self.reporter = CompressionReporter::new(enabled);
        self
    }

    /// Produce the build settings. The minifier is always terser.
    pub fn optimize(self) -> ProductionBuildConfig {
        let config = ProductionBuildConfig {
            minify: MinifyStrategy::Terser,
            compression_options: self.compression,
            chunking_strategy: self.chunks,
            report_compressed_size: self.reporter.is_enabled(),
        };

        tracing::debug!(
            minify = %config.minify,
            chunks = config.chunking_strategy.len(),
            pure_functions = config.compression_options.pure_function_names.len(),
            report_compressed_size = config.report_compressed_size,
            "production build configured"
        );

        config
    }
}

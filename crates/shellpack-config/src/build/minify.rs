//! Minifier selection.
//!
//! The external bundler accepts a minifier name; only the thorough one is
//! acceptable for packaged output.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Minifier the bundler runs over the production output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyStrategy {
    /// Full compression pass with dead-code elimination and call stripping.
    #[default]
    Terser,
    /// Fast whitespace and syntax minification. Ignores compression options.
    Esbuild,
}

impl MinifyStrategy {
    /// Parse a strategy name.
    ///
    /// Values are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use shellpack_config::MinifyStrategy;
    ///
    /// assert_eq!(MinifyStrategy::parse("TERSER").unwrap(), MinifyStrategy::Terser);
    /// assert!(MinifyStrategy::parse("uglify").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "terser" => Ok(Self::Terser),
            "esbuild" => Ok(Self::Esbuild),
            _ => Err(ConfigError::InvalidValue {
                field: "minify".to_string(),
                hint: Some(format!("unknown minifier '{s}', expected terser or esbuild")),
            }),
        }
    }

    /// Whether this strategy honors compression options such as dropping
    /// console calls.
    pub fn is_thorough(self) -> bool {
        matches!(self, Self::Terser)
    }
}

impl FromStr for MinifyStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for MinifyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terser => write!(f, "terser"),
            Self::Esbuild => write!(f, "esbuild"),
        }
    }
}

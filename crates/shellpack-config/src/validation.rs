//! Project config validation.

use std::collections::HashMap;

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;
use crate::watch::WatchFilter;

/// Pluggable validation for project declarations.
pub trait ConfigValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()>;
}

/// Checks declarations on their own, without touching the filesystem.
///
/// Chunk modules are not resolved here; that needs the dependency graph.
///
/// # Example
///
/// ```
/// use shellpack_config::{ConfigValidator, ProjectConfig, SchemaValidator};
///
/// SchemaValidator.validate(&ProjectConfig::default()).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        if config.port == 0 {
            return Err(ConfigError::SchemaValidation {
                message: "port 0 asks the OS for a random port".to_string(),
                hint: Some("The desktop shell needs a fixed port; the default is 1420".to_string()),
            });
        }

        validate_chunks(config)?;

        for pattern in &config.foreign_dirs {
            if pattern.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "foreign directory globs cannot be empty".to_string(),
                    hint: Some("Remove empty strings from 'foreign_dirs'".to_string()),
                });
            }
        }
        WatchFilter::new(config.foreign_dirs.iter().cloned())?;

        for name in &config.pure_functions {
            validate_pure_function(name)?;
        }

        Ok(())
    }
}

fn validate_chunks(config: &ProjectConfig) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for (chunk, modules) in config.chunks.iter() {
        if chunk.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "chunk names cannot be empty".to_string(),
                hint: Some("Give every entry under [chunks] a name".to_string()),
            });
        }

        for module in modules {
            if module.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("chunk '{chunk}' lists an empty module specifier"),
                    hint: Some(format!("Remove empty strings from chunks.{chunk}")),
                });
            }

            if let Some(previous) = owners.insert(module.as_str(), chunk) {
                if previous != chunk {
                    return Err(ConfigError::SchemaValidation {
                        message: format!(
                            "module '{module}' is declared in both chunk '{previous}' and chunk '{chunk}'"
                        ),
                        hint: Some("A module can belong to one manual chunk only".to_string()),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Pure function names are dotted identifier paths such as `console.log`.
fn validate_pure_function(name: &str) -> Result<()> {
    let well_formed = !name.is_empty() && name.split('.').all(is_identifier);
    if well_formed {
        return Ok(());
    }

    Err(ConfigError::SchemaValidation {
        message: format!("'{name}' is not a valid pure function name"),
        hint: Some("Use a dotted identifier path, e.g. \"console.log\"".to_string()),
    })
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Validate with [`SchemaValidator`].
pub fn validate_schema(config: &ProjectConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

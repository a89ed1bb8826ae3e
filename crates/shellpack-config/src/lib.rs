//! # shellpack-config
//!
//! Build orchestration for a desktop-shell web frontend: how the dev server is
//! bound, how hot-module-reload reaches a client on another host, and how the
//! production bundle is minified and chunked.
//!
//! The crate produces plain values. Nothing here binds sockets for the external
//! runtime or runs a bundler; the only I/O is reading the process environment,
//! loading `shellpack.toml`, and the strict-port probe.
//!
//! ```
//! use shellpack_config::{BuildConfiguration, EnvSnapshot, ProjectConfig};
//!
//! let env = EnvSnapshot::new().with("TAURI_DEV_HOST", "192.168.1.50");
//! let config = BuildConfiguration::resolve(&ProjectConfig::default(), &env).unwrap();
//!
//! let hmr = config.server.hmr.as_ref().unwrap();
//! assert_eq!(config.server.port, 1420);
//! assert_eq!(hmr.port, 1421);
//! ```

pub mod build;
pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod project;
pub mod server;
pub mod validation;
pub mod vite;
pub mod watch;

// Re-export main types
pub use build::*;
pub use config::*;
pub use env::*;
pub use error::*;
pub use project::*;
pub use server::*;
pub use watch::*;

pub use discovery::{CONFIG_FILE, ConfigDiscovery, ENV_PREFIX};
pub use validation::{ConfigValidator, SchemaValidator, validate_schema};
pub use vite::to_vite_config;

//! # shellpack-graph
//!
//! The checks that need more than configuration values: whether manual chunk
//! modules exist in the project's dependency graph, and which diagnostic calls
//! the production minifier will strip from the sources.
//!
//! ```
//! use shellpack_config::ChunkingStrategy;
//! use shellpack_graph::{DependencyGraph, DependencyType, GraphError};
//!
//! let chunks = ChunkingStrategy::default(); // vendor -> ["vue"]
//!
//! let graph = DependencyGraph::new().with_package("vue", DependencyType::Production);
//! assert!(graph.resolve_chunks(&chunks).is_ok());
//!
//! let empty = DependencyGraph::new();
//! assert!(matches!(
//!     empty.resolve_chunks(&chunks),
//!     Err(GraphError::ModuleResolution { .. })
//! ));
//! ```

pub mod error;
pub mod graph;
pub mod package_json;
pub mod sources;
pub mod strip;
pub mod vue;

pub use error::{GraphError, Result};
pub use graph::{DependencyGraph, ModuleOrigin, ResolvedChunk, ResolvedModule, UnresolvedModule};
pub use package_json::{DependencyType, PackageJson, extract_package_name};
pub use sources::{SOURCE_EXTENSIONS, collect_sources, is_source_file};
pub use strip::{DiagnosticScanner, SiteKind, StripDisposition, StripReport, StripSite};
pub use vue::{ScriptBlock, extract_vue_scripts};

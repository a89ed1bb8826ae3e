//! Resolution of manual chunk declarations.
//!
//! Bare specifiers resolve through the packages a manifest declares. Relative
//! and absolute specifiers resolve against the project root when one is set.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Serialize;
use shellpack_config::ChunkingStrategy;

use crate::error::{GraphError, Result};
use crate::package_json::{DependencyType, PackageJson, extract_package_name};

/// Extensions tried, in order, for local specifiers without one.
const LOCAL_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "vue"];

/// Where a chunk module was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModuleOrigin {
    /// Declared package, possibly reached through a subpath.
    Package {
        name: String,
        dependency_type: DependencyType,
    },
    /// File inside the project.
    Local { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModule {
    /// Specifier as declared.
    pub specifier: String,
    pub origin: ModuleOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedChunk {
    pub name: String,
    pub modules: Vec<ResolvedModule>,
}

/// Chunk module reference that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedModule {
    pub chunk: String,
    pub module: String,
}

impl From<UnresolvedModule> for GraphError {
    fn from(unresolved: UnresolvedModule) -> Self {
        GraphError::ModuleResolution {
            chunk: unresolved.chunk,
            module: unresolved.module,
        }
    }
}

/// Packages and files a chunk declaration may reference.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    packages: FxHashMap<String, DependencyType>,
    root: Option<PathBuf>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph of every package `pkg` declares. When the manifest was loaded
    /// from disk its directory becomes the root for local specifiers.
    pub fn from_package_json(pkg: &PackageJson) -> Self {
        let mut graph = Self::new();
        for (name, dep_type) in pkg.declared_packages() {
            graph
                .packages
                .entry(name.to_string())
                .or_insert(dep_type);
        }
        if let Some(dir) = pkg.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            graph.root = Some(dir.to_path_buf());
        }
        tracing::debug!(packages = graph.packages.len(), "dependency graph built");
        graph
    }

    pub fn with_package(mut self, name: impl Into<String>, dep_type: DependencyType) -> Self {
        self.packages.insert(name.into(), dep_type);
        self
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn contains_package(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Resolve one specifier, or `None` when the graph has no such module.
    pub fn resolve(&self, specifier: &str) -> Option<ResolvedModule> {
        let origin = if is_local(specifier) {
            let path = self.resolve_local(specifier)?;
            ModuleOrigin::Local { path }
        } else {
            let name = extract_package_name(specifier);
            let dependency_type = *self.packages.get(name)?;
            ModuleOrigin::Package {
                name: name.to_string(),
                dependency_type,
            }
        };

        Some(ResolvedModule {
            specifier: specifier.to_string(),
            origin,
        })
    }

    /// Resolve every chunk, failing on the first unresolved module.
    ///
    /// Chunks come back in declaration order with their modules untouched.
    pub fn resolve_chunks(&self, chunks: &ChunkingStrategy) -> Result<Vec<ResolvedChunk>> {
        let mut resolved = Vec::with_capacity(chunks.len());
        for (name, modules) in chunks.iter() {
            let mut chunk = ResolvedChunk {
                name: name.to_string(),
                modules: Vec::with_capacity(modules.len()),
            };
            for module in modules {
                let found = self.resolve(module).ok_or_else(|| UnresolvedModule {
                    chunk: name.to_string(),
                    module: module.clone(),
                })?;
                chunk.modules.push(found);
            }
            resolved.push(chunk);
        }
        Ok(resolved)
    }

    /// Every unresolved module across all chunks.
    pub fn unresolved(&self, chunks: &ChunkingStrategy) -> Vec<UnresolvedModule> {
        chunks
            .iter()
            .flat_map(|(name, modules)| {
                modules
                    .iter()
                    .filter(|module| self.resolve(module).is_none())
                    .map(move |module| UnresolvedModule {
                        chunk: name.to_string(),
                        module: module.clone(),
                    })
            })
            .collect()
    }

    fn resolve_local(&self, specifier: &str) -> Option<PathBuf> {
        let root = self.root.as_deref()?;
        let candidate = root.join(specifier.trim_start_matches('/'));
        if candidate.is_file() {
            return Some(candidate);
        }
        if candidate.extension().is_some() {
            return None;
        }
        LOCAL_EXTENSIONS
            .iter()
            .map(|ext| candidate.with_extension(ext))
            .find(|path| path.is_file())
            .or_else(|| index_file(&candidate))
    }
}

fn index_file(dir: &Path) -> Option<PathBuf> {
    LOCAL_EXTENSIONS
        .iter()
        .map(|ext| dir.join("index").with_extension(ext))
        .find(|path| path.is_file())
}

fn is_local(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> DependencyGraph {
        DependencyGraph::new()
            .with_package("vue", DependencyType::Production)
            .with_package("@vueuse/core", DependencyType::Production)
            .with_package("vite", DependencyType::Development)
    }

    #[test]
    fn resolves_bare_and_subpath_specifiers() {
        let graph = graph();
        assert!(graph.resolve("vue").is_some());
        assert!(graph.resolve("vue/dist/vue.esm-bundler.js").is_some());

        let scoped = graph.resolve("@vueuse/core/index.mjs").unwrap();
        assert_eq!(
            scoped.origin,
            ModuleOrigin::Package {
                name: "@vueuse/core".to_string(),
                dependency_type: DependencyType::Production,
            }
        );
        assert_eq!(scoped.specifier, "@vueuse/core/index.mjs");
    }

    #[test]
    fn undeclared_package_is_unresolved() {
        assert!(graph().resolve("react").is_none());
        assert!(graph().resolve("vue-router").is_none());
    }

    #[test]
    fn local_specifier_without_root_is_unresolved() {
        assert!(graph().resolve("./src/utils.ts").is_none());
    }

    #[test]
    fn resolve_chunks_reports_first_failure() {
        let chunks = ChunkingStrategy::empty()
            .with_chunk("vendor", ["vue", "pinia"])
            .with_chunk("ui", ["react"]);

        match graph().resolve_chunks(&chunks).unwrap_err() {
            GraphError::ModuleResolution { chunk, module } => {
                assert_eq!(chunk, "vendor");
                assert_eq!(module, "pinia");
            }
            other => panic!("expected ModuleResolution, got {other:?}"),
        }

        let all = graph().unresolved(&chunks);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].module, "react");
    }

    #[test]
    fn resolve_chunks_keeps_order() {
        let chunks = ChunkingStrategy::empty()
            .with_chunk("tooling", ["vite"])
            .with_chunk("vendor", ["vue"]);
        let resolved = graph().resolve_chunks(&chunks).unwrap();
        let names: Vec<_> = resolved.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["tooling", "vendor"]);
    }

    #[test]
    fn first_declaring_table_wins() {
        let pkg = PackageJson::parse(
            r#"{ "devDependencies": { "vue": "3" }, "dependencies": { "vue": "3" } }"#,
        )
        .unwrap();
        let graph = DependencyGraph::from_package_json(&pkg);
        match graph.resolve("vue").unwrap().origin {
            ModuleOrigin::Package { dependency_type, .. } => {
                assert_eq!(dependency_type, DependencyType::Production)
            }
            other => panic!("unexpected origin {other:?}"),
        }
    }
}

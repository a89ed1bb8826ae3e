//! Manual chunk declarations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Chunk name to the module specifiers grouped into it.
///
/// Specifiers are kept verbatim; resolving them against the dependency graph
/// is a separate step. Modules not listed anywhere fall back to the bundler's
/// automatic chunking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkingStrategy(IndexMap<String, Vec<String>>);

impl Default for ChunkingStrategy {
    fn default() -> Self {
        Self::empty().with_chunk("vendor", ["vue"])
    }
}

impl ChunkingStrategy {
    /// No manual chunks.
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    /// Add or replace a chunk. Replacing keeps the chunk's original position.
    pub fn with_chunk<I, S>(mut self, name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(name.into(), modules.into_iter().map(Into::into).collect());
        self
    }

    /// Chunks in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, modules)| (name.as_str(), modules.as_slice()))
    }

    pub fn get(&self, chunk: &str) -> Option<&[String]> {
        self.0.get(chunk).map(Vec::as_slice)
    }

    /// First chunk declaring `module`.
    pub fn chunk_for(&self, module: &str) -> Option<&str> {
        self.iter()
            .find(|(_, modules)| modules.iter().any(|m| m == module))
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn module_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChunkingStrategy
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, (name, modules)| acc.with_chunk(name, modules))
    }
}

//! Environment resolution for externally reachable dev servers.
//!
//! The desktop shell sets `TAURI_DEV_HOST` when the frontend must be reachable
//! from another device (a phone, an emulator, a VM). Everything else about the
//! environment is ignored.

use std::collections::{BTreeMap, HashMap};

/// Variable naming the externally reachable dev host.
pub const DEV_HOST_VAR: &str = "TAURI_DEV_HOST";

/// Read access to environment variables.
///
/// Configuration is built against this trait rather than `std::env` so callers
/// can resolve against a fixed snapshot.
pub trait Environment {
    /// Returns the value of `key`, or `None` when unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An immutable set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Empty snapshot: every lookup returns `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the variables shellpack reads out of the process environment.
    pub fn capture() -> Self {
        let mut snapshot = Self::new();
        if let Some(host) = ProcessEnv.var(DEV_HOST_VAR) {
            snapshot.vars.insert(DEV_HOST_VAR.to_string(), host);
        }
        snapshot
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for EnvSnapshot {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Resolve the externally reachable dev host.
///
/// An empty value counts as unset, so `Some` always carries a usable host.
pub fn resolve_reachability_host(env: &impl Environment) -> Option<String> {
    let host = env.var(DEV_HOST_VAR).filter(|value| !value.is_empty());
    match &host {
        Some(host) => tracing::debug!(%host, "{DEV_HOST_VAR} set, dev server reachable externally"),
        None => tracing::debug!("{DEV_HOST_VAR} unset, dev server bound locally"),
    }
    host
}

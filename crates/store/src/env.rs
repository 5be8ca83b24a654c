//! Environment variable access for resolution and fallback.
//!
//! Responsibilities:
//! - Abstract name-to-value lookup behind the [`Environment`] trait.
//! - Provide the live process environment (`ProcessEnv`) and a fixed
//!   in-memory mapping (`MapEnv`) for deterministic tests.
//!
//! Does NOT handle:
//! - Placeholder grammar (see resolver.rs).
//! - Deciding between snapshot values and environment fallback (see
//!   store.rs).
//!
//! Invariants:
//! - `lookup` distinguishes "set to empty string" (`Some("")`) from "unset"
//!   (`None`); callers decide whether the two collapse.
//! - Values are returned exactly as stored, without trimming.

use std::collections::HashMap;

/// Name-to-value lookup with set/unset semantics.
///
/// The resolver and the store take an `Environment` instead of reading
/// `std::env` directly, so tests can run against a fixed mapping without
/// mutating process-wide state.
pub trait Environment: Send + Sync {
    /// Look up a variable, distinguishing set from unset.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Value of a variable, or the empty string when unset.
    fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        // A value that is not valid unicode cannot be represented here;
        // treat it as unset.
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment.
///
/// ```
/// use cloudconfig_store::{Environment, MapEnv};
///
/// let env: MapEnv = [("PORT", "8080")].into_iter().collect();
/// assert_eq!(env.lookup("PORT"), Some("8080".to_string()));
/// assert_eq!(env.lookup("HOST"), None);
/// assert_eq!(env.get("HOST"), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl Environment for MapEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

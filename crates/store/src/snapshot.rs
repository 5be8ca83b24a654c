//! Merged configuration snapshots.
//!
//! Responsibilities:
//! - Deserialize the `propertySources` list out of a config server
//!   document.
//! - Flatten the ordered sources into one key-to-value map, first-wins,
//!   running every string value through the placeholder resolver.
//!
//! Does NOT handle:
//! - Fetching the document (see the client crate).
//! - Serving reads with environment fallback (see store.rs).
//!
//! Invariants:
//! - The earliest source that defines a key is authoritative; later
//!   sources never override it.
//! - Only string-valued entries participate; entries of any other JSON
//!   type are skipped.
//! - A document without a `propertySources` array is rejected, never
//!   treated as an empty snapshot.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::SyncError;
use crate::resolver::{ResolvedValue, Resolver};

/// One named property source from a config server document.
///
/// The name is diagnostic only; precedence comes from the source's position
/// in the server's list, most specific first.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertySource {
    #[serde(default)]
    pub name: String,
    pub source: serde_json::Map<String, Value>,
}

/// Immutable, fully merged and resolved view of one fetched document.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: HashMap<String, ResolvedValue>,
}

impl Snapshot {
    /// Merge ordered property sources into a snapshot.
    ///
    /// Sources are visited in server order and the first source defining a
    /// key wins. String values are resolved through `resolver`; values of
    /// any other JSON type are skipped.
    pub fn build(sources: &[PropertySource], resolver: &Resolver) -> Self {
        let mut entries: HashMap<String, ResolvedValue> = HashMap::new();
        for source in sources {
            debug!(
                name = %source.name,
                keys = source.source.len(),
                "Merging property source"
            );
            for (key, value) in &source.source {
                let Some(raw) = value.as_str() else {
                    continue;
                };
                if !entries.contains_key(key) {
                    entries.insert(key.clone(), resolver.resolve(raw));
                }
            }
        }
        Self { entries }
    }

    /// Extract the `propertySources` list from a document and merge it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidPayload`] when the document carries no
    /// `propertySources` array or one of its elements is not a property
    /// source object.
    pub fn from_document(document: &Value, resolver: &Resolver) -> Result<Self, SyncError> {
        let sources = document
            .get("propertySources")
            .ok_or_else(|| SyncError::InvalidPayload("missing propertySources".to_string()))?;
        let sources = sources.as_array().ok_or_else(|| {
            SyncError::InvalidPayload("propertySources is not an array".to_string())
        })?;
        let sources: Vec<PropertySource> = sources
            .iter()
            .map(|element| {
                serde_json::from_value(element.clone()).map_err(|e| {
                    SyncError::InvalidPayload(format!("malformed property source: {e}"))
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::build(&sources, resolver))
    }

    /// Entry for `key`, if the merged configuration defines it.
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.entries.get(key)
    }

    /// Number of merged keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot defines no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Resolved configuration documents.
//!
//! Responsibilities:
//! - Bundle the environment map with the resolved current environment in a
//!   returned wrapper type, instead of mutating caller-owned state.
//!
//! Does NOT handle:
//! - Resolution itself (see resolver.rs) or loading (see loader.rs).
//!
//! Invariants:
//! - A `Document` only exists for a fully successful resolution; there is
//!   no partially-resolved state to observe.
//! - The entry for the current environment holds the resolved settings;
//!   all other entries keep their raw document form.

use serde_json::Value;

use crate::entry::Settings;

/// The environment selected for a load call, with its resolved settings.
///
/// Created once per `load`/`load_url`/`load_object` call and replaced
/// wholesale on each call, never partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentEnvironment {
    /// Name of the selected environment.
    pub env: String,
    /// Flat, fully-resolved settings map.
    pub settings: Settings,
}

/// A configuration document with one environment resolved.
///
/// Exposes every environment key of the original document plus the
/// resolved current environment.
#[derive(Debug, Clone)]
pub struct Document {
    environments: serde_json::Map<String, Value>,
    current: CurrentEnvironment,
}

impl Document {
    pub(crate) fn new(
        environments: serde_json::Map<String, Value>,
        current: CurrentEnvironment,
    ) -> Self {
        Self {
            environments,
            current,
        }
    }

    /// Look up an environment entry by name.
    ///
    /// For the current environment this is the resolved settings object;
    /// for every other environment it is the raw document entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.environments.get(name)
    }

    /// All environment entries, keyed by name.
    pub fn environments(&self) -> &serde_json::Map<String, Value> {
        &self.environments
    }

    /// The environment selected for this load call.
    pub fn get_current(&self) -> &CurrentEnvironment {
        &self.current
    }
}

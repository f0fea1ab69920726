//! Environment-entry shapes of a configuration document.
//!
//! Responsibilities:
//! - Define the `EnvEntry` tagged union and the flat `Settings` map.
//! - Pin the variant check order in one place via `#[serde(untagged)]`:
//!   string, then `ENV` key present, then `url` key present, then inline
//!   settings. No ad-hoc property probing anywhere else.
//!
//! Does NOT handle:
//! - Resolution of entries to settings (see resolver.rs).
//!
//! Invariants:
//! - Any JSON object deserializes into exactly one variant; the `Inline`
//!   variant is the catch-all for plain settings maps.
//! - `overwrite` and `addIfNotExist` patches can appear at every object
//!   level of a chain.

use serde::Deserialize;
use serde_json::Value;

/// Flat mapping of setting name to value.
///
/// After resolution every value is scalar (string, boolean, number, or
/// null); nested objects and `ENV`/`url` wrapper artifacts never survive.
pub type Settings = serde_json::Map<String, Value>;

/// One environment entry of a configuration document.
///
/// Variants are tried in declaration order, which is the documented
/// discriminant order for entry shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnvEntry {
    /// A bare string, interpreted as a full connection URL.
    Url(String),

    /// A reference to an environment variable holding a connection URL.
    EnvRef {
        /// Name of the variable to read.
        #[serde(rename = "ENV")]
        var: String,
        #[serde(default)]
        overwrite: Option<Settings>,
        #[serde(default, rename = "addIfNotExist")]
        add_if_not_exist: Option<Settings>,
    },

    /// A wrapper whose `url` field is itself an entry, resolved
    /// recursively.
    Wrapper {
        url: Box<EnvEntry>,
        #[serde(default)]
        overwrite: Option<Settings>,
        #[serde(default, rename = "addIfNotExist")]
        add_if_not_exist: Option<Settings>,
    },

    /// A plain settings map. Individual values may be `ENV`-reference
    /// objects, substituted during resolution.
    Inline {
        #[serde(default)]
        overwrite: Option<Settings>,
        #[serde(default, rename = "addIfNotExist")]
        add_if_not_exist: Option<Settings>,
        #[serde(flatten)]
        settings: Settings,
    },
}

//! Recursive resolution of environment entries.
//!
//! Responsibilities:
//! - Select the active environment name (explicit argument, then selector
//!   variable, then configured default).
//! - Walk one entry chain recursively, decomposing URLs, substituting
//!   environment variables, and applying patches bottom-up.
//! - Detect `overwrite` conflicts across nesting levels.
//!
//! Does NOT handle:
//! - Reading document files or building the returned `Document` (see
//!   loader.rs).
//! - URL parsing itself (see url.rs).
//!
//! Invariants:
//! - Resolution is all-or-nothing: any failure propagates before a settings
//!   map escapes this module.
//! - Patches apply innermost-first; each enclosing level patches the
//!   already-patched result of the level below.
//! - `addIfNotExist` only inserts keys absent at the moment it is applied.
//! - A key may appear in `overwrite` at most once per chain.

use std::collections::HashSet;

use serde_json::Value;

use crate::entry::{EnvEntry, Settings};
use crate::env::EnvLookup;
use crate::error::ConfigError;
use crate::url::decompose_url;

/// Select the active environment name.
///
/// First match wins: the explicit argument, then the selector variable when
/// set and non-empty, then the configured default name.
pub(crate) fn select_env<E: EnvLookup>(
    lookup: &E,
    explicit: Option<&str>,
    selector_var: &str,
    default_env: &str,
) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    lookup
        .get(selector_var)
        .unwrap_or_else(|| default_env.to_string())
}

/// Resolves one environment entry against an injected variable table.
pub(crate) struct Resolver<'a, E: EnvLookup> {
    lookup: &'a E,
}

impl<'a, E: EnvLookup> Resolver<'a, E> {
    pub(crate) fn new(lookup: &'a E) -> Self {
        Self { lookup }
    }

    /// Resolve an entry chain to a flat settings map.
    pub(crate) fn resolve(&self, entry: &EnvEntry) -> Result<Settings, ConfigError> {
        let mut overwritten = HashSet::new();
        self.resolve_level(entry, &mut overwritten)
    }

    fn resolve_level(
        &self,
        entry: &EnvEntry,
        overwritten: &mut HashSet<String>,
    ) -> Result<Settings, ConfigError> {
        match entry {
            EnvEntry::Url(raw) => decompose_url(raw),
            EnvEntry::EnvRef {
                var,
                overwrite,
                add_if_not_exist,
            } => {
                let raw = self
                    .lookup
                    .get(var)
                    .ok_or_else(|| ConfigError::MissingEnvVar(var.clone()))?;
                let mut settings = decompose_url(&raw)?;
                apply_patches(
                    &mut settings,
                    overwrite.as_ref(),
                    add_if_not_exist.as_ref(),
                    overwritten,
                )?;
                Ok(settings)
            }
            EnvEntry::Wrapper {
                url,
                overwrite,
                add_if_not_exist,
            } => {
                let mut settings = self.resolve_level(url, overwritten)?;
                apply_patches(
                    &mut settings,
                    overwrite.as_ref(),
                    add_if_not_exist.as_ref(),
                    overwritten,
                )?;
                Ok(settings)
            }
            EnvEntry::Inline {
                settings,
                overwrite,
                add_if_not_exist,
            } => {
                let mut resolved = Settings::new();
                for (key, value) in settings {
                    resolved.insert(key.clone(), self.resolve_setting(key, value)?);
                }
                apply_patches(
                    &mut resolved,
                    overwrite.as_ref(),
                    add_if_not_exist.as_ref(),
                    overwritten,
                )?;
                Ok(resolved)
            }
        }
    }

    /// Resolve one inline setting value: scalars pass through, `ENV`
    /// references become the variable's string value, anything else cannot
    /// appear in a flat settings map.
    fn resolve_setting(&self, key: &str, value: &Value) -> Result<Value, ConfigError> {
        if is_scalar(value) {
            return Ok(value.clone());
        }
        if let Some(var) = env_ref_name(value) {
            let raw = self
                .lookup
                .get(var)
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))?;
            return Ok(Value::from(raw));
        }
        Err(ConfigError::InvalidSetting {
            key: key.to_string(),
        })
    }
}

/// Apply one level's patches to an already-resolved settings map.
///
/// `overwritten` tracks keys claimed by `overwrite` patches lower in the
/// chain; a repeat is a configuration error.
fn apply_patches(
    settings: &mut Settings,
    overwrite: Option<&Settings>,
    add_if_not_exist: Option<&Settings>,
    overwritten: &mut HashSet<String>,
) -> Result<(), ConfigError> {
    if let Some(patch) = overwrite {
        for (key, value) in patch {
            require_scalar(key, value)?;
            if !overwritten.insert(key.clone()) {
                return Err(ConfigError::DuplicateOverwrite { key: key.clone() });
            }
            settings.insert(key.clone(), value.clone());
        }
    }
    if let Some(patch) = add_if_not_exist {
        for (key, value) in patch {
            require_scalar(key, value)?;
            settings
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    Ok(())
}

fn require_scalar(key: &str, value: &Value) -> Result<(), ConfigError> {
    if is_scalar(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            key: key.to_string(),
        })
    }
}

/// An object carrying a string `ENV` key is an environment reference.
fn env_ref_name(value: &Value) -> Option<&str> {
    value.as_object()?.get("ENV")?.as_str()
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

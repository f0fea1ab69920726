//! Environment-variable access for the resolver.
//!
//! Responsibilities:
//! - Define the `EnvLookup` capability the resolver reads variables through.
//! - Provide the process-backed implementation used in production.
//! - Provide an in-memory table for deterministic tests and embedding.
//!
//! Does NOT handle:
//! - Deciding which variables to read (see resolver.rs and loader.rs).
//! - Writing to the environment: the table is read-only from this crate.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use std::collections::HashMap;

/// Read access to an environment-variable table.
///
/// The resolver never reads the process environment ambiently; it goes
/// through this trait so tests can substitute a fixed table.
pub trait EnvLookup {
    /// Look up a variable, returning `None` when it is unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// Read an environment variable, returning None if unset, empty, or
/// whitespace-only. Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `EnvLookup` backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env_var_or_none(name)
    }
}

/// `EnvLookup` backed by an in-memory table.
///
/// Primarily for tests, but also usable by callers that resolve documents
/// against a captured snapshot instead of the live process environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any previous value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_var_or_none_filters_empty_and_whitespace() {
        let key = "_DBCONN_TEST_VAR";

        let unset = env_var_or_none(key);
        assert!(unset.is_none(), "Unset env var should return None");

        temp_env::with_vars([(key, Some(""))], || {
            assert!(env_var_or_none(key).is_none());
        });

        temp_env::with_vars([(key, Some("   "))], || {
            assert!(env_var_or_none(key).is_none());
        });

        temp_env::with_vars([(key, Some(" value "))], || {
            assert_eq!(env_var_or_none(key), Some("value".to_string()));
        });
    }

    #[test]
    fn map_env_returns_inserted_values() {
        let env = MapEnv::new().set("DATABASE_URL", "postgres://localhost/db");
        assert_eq!(
            env.get("DATABASE_URL"),
            Some("postgres://localhost/db".to_string())
        );
        assert!(env.get("OTHER").is_none());
    }
}

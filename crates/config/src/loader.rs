//! Entry points for loading configuration documents.
//!
//! Responsibilities:
//! - Provide the `ConfigLoader` builder wiring an environment lookup, a
//!   default environment name, and the selector variable together.
//! - Implement the three load pipelines: file, single URL, in-memory
//!   object.
//! - Enforce the `DOTENV_DISABLED` gate for optional `.env` bootstrap.
//!
//! Does NOT handle:
//! - Recursive entry resolution (see resolver.rs).
//! - URL decomposition (see url.rs).
//!
//! Invariants / Assumptions:
//! - Every pipeline is all-or-nothing: a `Document` is returned only after
//!   the selected environment resolved completely.
//! - `load_dotenv()` must be called explicitly to enable `.env` loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()`
//!   is called.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::constants::{DEFAULT_ENV_NAME, ENV_SELECTOR_VAR};
use crate::document::{CurrentEnvironment, Document};
use crate::entry::EnvEntry;
use crate::env::{EnvLookup, ProcessEnv};
use crate::error::ConfigError;
use crate::resolver::{Resolver, select_env};

/// Builder for configuration loading.
///
/// The defaults use the process environment, the `NODE_ENV` selector
/// variable, and `local` as the fallback environment name.
pub struct ConfigLoader<E: EnvLookup = ProcessEnv> {
    lookup: E,
    default_env: String,
    selector_var: String,
}

impl ConfigLoader {
    /// Create a loader backed by the process environment.
    pub fn new() -> Self {
        Self {
            lookup: ProcessEnv,
            default_env: DEFAULT_ENV_NAME.to_string(),
            selector_var: ENV_SELECTOR_VAR.to_string(),
        }
    }

}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvLookup> ConfigLoader<E> {
    /// Substitute the environment-variable table the resolver reads from.
    pub fn with_env_lookup<L: EnvLookup>(self, lookup: L) -> ConfigLoader<L> {
        ConfigLoader {
            lookup,
            default_env: self.default_env,
            selector_var: self.selector_var,
        }
    }

    /// Set the fallback environment name used when neither an explicit
    /// name nor the selector variable selects one.
    pub fn with_default_env(mut self, name: impl Into<String>) -> Self {
        self.default_env = name.into();
        self
    }

    /// Set the environment variable consulted for the active environment
    /// name.
    pub fn with_selector_var(mut self, name: impl Into<String>) -> Self {
        self.selector_var = name.into();
        self
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or
    /// "1", the `.env` file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read
    /// (`ConfigError::DotenvIo`). Missing `.env` files are silently
    /// ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to
    /// prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Read and resolve a JSON document file.
    ///
    /// Decode errors propagate unmodified as `ConfigError::Syntax`; no
    /// partially-parsed document is kept.
    pub fn load(&self, path: impl AsRef<Path>, env: Option<&str>) -> Result<Document, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading config document");
        let source = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&source)?;
        self.load_object(document, env)
    }

    /// Resolve a single connection URL as a one-entry document.
    ///
    /// The entry is named by `env`, or by the usual selection chain when
    /// omitted.
    pub fn load_url(&self, url: &str, env: Option<&str>) -> Result<Document, ConfigError> {
        let name = select_env(&self.lookup, env, &self.selector_var, &self.default_env);
        let mut environments = serde_json::Map::new();
        environments.insert(name.clone(), Value::String(url.to_string()));
        self.resolve_environments(environments, Some(&name))
    }

    /// Resolve an in-memory document object.
    ///
    /// Identical pipeline to [`load`](Self::load) minus the file read.
    pub fn load_object(&self, document: Value, env: Option<&str>) -> Result<Document, ConfigError> {
        match document {
            Value::Object(environments) => self.resolve_environments(environments, env),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    fn resolve_environments(
        &self,
        mut environments: serde_json::Map<String, Value>,
        env: Option<&str>,
    ) -> Result<Document, ConfigError> {
        let name = select_env(&self.lookup, env, &self.selector_var, &self.default_env);
        let raw = environments
            .get(&name)
            .ok_or_else(|| ConfigError::EnvNotFound(name.clone()))?;
        let entry: EnvEntry = serde_json::from_value(raw.clone())?;
        let settings = Resolver::new(&self.lookup).resolve(&entry)?;
        tracing::debug!(env = %name, settings = settings.len(), "resolved current environment");

        environments.insert(name.clone(), Value::Object(settings.clone()));
        Ok(Document::new(
            environments,
            CurrentEnvironment {
                env: name,
                settings,
            },
        ))
    }
}

/// Read and resolve a JSON document file with default loader settings.
pub fn load(path: impl AsRef<Path>, env: Option<&str>) -> Result<Document, ConfigError> {
    ConfigLoader::new().load(path, env)
}

/// Resolve a single connection URL with default loader settings.
pub fn load_url(url: &str, env: Option<&str>) -> Result<Document, ConfigError> {
    ConfigLoader::new().load_url(url, env)
}

/// Resolve an in-memory document object with default loader settings.
pub fn load_object(document: Value, env: Option<&str>) -> Result<Document, ConfigError> {
    ConfigLoader::new().load_object(document, env)
}

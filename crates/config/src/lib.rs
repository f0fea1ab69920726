//! Environment-parameterized database connection configuration.
//!
//! This crate resolves a layered configuration document (a JSON file, a
//! single connection URL, or an in-memory object) into one flat settings
//! map for the currently active environment. Entries may reference
//! environment variables, wrap other entries, and extend their result with
//! `overwrite` / `addIfNotExist` patches.

mod constants;
mod document;
mod entry;
mod env;
mod error;
mod loader;
mod resolver;
mod url;

pub use constants::{DEFAULT_ENV_NAME, ENV_SELECTOR_VAR};
pub use document::{CurrentEnvironment, Document};
pub use entry::{EnvEntry, Settings};
pub use env::{EnvLookup, MapEnv, ProcessEnv, env_var_or_none};
pub use error::ConfigError;
pub use loader::{ConfigLoader, load, load_object, load_url};
pub use url::decompose_url;

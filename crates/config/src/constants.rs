//! Centralized constants for the configuration resolver.
//!
//! This module contains the conventional names used during environment
//! selection so they are defined in one place instead of scattered as
//! string literals.

/// Environment entry selected when no explicit name is given and the
/// selector variable is unset. Callers can override this via
/// `ConfigLoader::with_default_env`.
pub const DEFAULT_ENV_NAME: &str = "local";

/// Environment variable consulted for the active environment name when no
/// explicit name is given. Callers can override this via
/// `ConfigLoader::with_selector_var`.
pub const ENV_SELECTOR_VAR: &str = "NODE_ENV";

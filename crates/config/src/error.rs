//! Error types for configuration loading and resolution.
//!
//! Responsibilities:
//! - Define error variants for every failure mode of the load pipeline.
//! - Preserve underlying I/O and JSON errors as sources for callers.
//!
//! Does NOT handle:
//! - Recovery or retries: every error aborts the whole `load` call.
//! - Logging: errors are returned to the caller, never reported internally.
//!
//! Invariants:
//! - All variants carry enough context for debugging (variable names, keys,
//!   offending URLs, paths).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret
//!   leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or resolving a configuration
/// document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document file could not be read.
    #[error("Failed to read config file at {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document source is not valid JSON. The underlying parse error is
    /// preserved unmodified.
    #[error("Failed to parse config document")]
    Syntax(#[from] serde_json::Error),

    /// The top level of a document must be an object mapping environment
    /// names to entries.
    #[error("Config document must be a JSON object keyed by environment name")]
    NotAnObject,

    /// A connection URL string could not be decomposed.
    #[error("Malformed connection URL '{url}': {message}")]
    Format { url: String, message: String },

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The same key appears in `overwrite` at more than one nesting level
    /// of a single resolution chain.
    #[error("Setting '{key}' is overwritten at more than one level")]
    DuplicateOverwrite { key: String },

    /// No entry exists for the selected environment name.
    #[error("No environment named '{0}' in config document")]
    EnvNotFound(String),

    /// A setting value is neither a scalar nor an `ENV` reference, so it
    /// cannot appear in a flat settings map.
    #[error("Setting '{key}' must be a scalar value or an ENV reference")]
    InvalidSetting { key: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

//! Connection-URL decomposition.
//!
//! Responsibilities:
//! - Turn a `scheme://[user[:password]@]host[:port]/path[?query]` string
//!   into a flat settings map without losing information needed to
//!   reconstruct a connection.
//! - Coerce query-string values to their natural scalar type.
//!
//! Does NOT handle:
//! - Environment-variable substitution or patches (see resolver.rs).
//! - Driver-specific validation of the resulting settings.
//!
//! Invariants:
//! - Pure function of its input string; no side effects.
//! - Output contains only scalar values.
//! - `user` and `password` are omitted when absent, never present-but-empty.

use serde_json::Value;
use url::Url;

use crate::entry::Settings;
use crate::error::ConfigError;

/// Decompose a connection URL into settings.
///
/// Field names in the result: `driver` (scheme), `user`, `password`,
/// `host`, `port` (numeric), `database` (path with the leading separator
/// stripped), plus one entry per query-string key.
///
/// # Errors
///
/// Returns `ConfigError::Format` when the string cannot be parsed or has
/// no host.
pub fn decompose_url(raw: &str) -> Result<Settings, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::Format {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => {
            return Err(ConfigError::Format {
                url: raw.to_string(),
                message: "missing host".to_string(),
            });
        }
    };

    let mut settings = Settings::new();
    settings.insert("driver".to_string(), Value::from(parsed.scheme()));

    let user = parsed.username();
    if !user.is_empty() {
        settings.insert("user".to_string(), Value::from(user));
    }
    if let Some(password) = parsed.password()
        && !password.is_empty()
    {
        settings.insert("password".to_string(), Value::from(password));
    }

    settings.insert("host".to_string(), Value::from(host));
    if let Some(port) = parsed.port() {
        settings.insert("port".to_string(), Value::from(port));
    }

    let database = parsed.path().trim_start_matches('/');
    if !database.is_empty() {
        settings.insert("database".to_string(), Value::from(database));
    }

    for (key, value) in parsed.query_pairs() {
        settings.insert(key.into_owned(), coerce_scalar(&value));
    }

    Ok(settings)
}

/// Deserialize a query-string value from its literal text: `"true"` and
/// `"false"` become booleans, integer text becomes a number, anything else
/// stays a string.
fn coerce_scalar(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(raw),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decomposes_full_url() {
        let settings = decompose_url("postgres://uname:pw@server.com/dbname").unwrap();
        assert_eq!(settings["driver"], json!("postgres"));
        assert_eq!(settings["user"], json!("uname"));
        assert_eq!(settings["password"], json!("pw"));
        assert_eq!(settings["host"], json!("server.com"));
        assert_eq!(settings["database"], json!("dbname"));
        assert!(!settings.contains_key("port"));
    }

    #[test]
    fn omits_credentials_when_absent() {
        let settings = decompose_url("mysql://server.com/app").unwrap();
        assert!(!settings.contains_key("user"));
        assert!(!settings.contains_key("password"));
        assert_eq!(settings["host"], json!("server.com"));
    }

    #[test]
    fn keeps_explicit_port_numeric() {
        let settings = decompose_url("postgres://server.com:5433/dbname").unwrap();
        assert_eq!(settings["port"], json!(5433));
    }

    #[test]
    fn coerces_query_values() {
        let settings =
            decompose_url("postgres://h.example/db?ssl=true&cache=false&pool=10&mode=verify-full")
                .unwrap();
        assert_eq!(settings["ssl"], json!(true));
        assert_eq!(settings["cache"], json!(false));
        assert_eq!(settings["pool"], json!(10));
        assert_eq!(settings["mode"], json!("verify-full"));
    }

    #[test]
    fn rejects_unparsable_url() {
        let err = decompose_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::Format { .. }));
    }

    #[test]
    fn rejects_url_without_host() {
        let err = decompose_url("postgres:dbname").unwrap_err();
        assert!(matches!(err, ConfigError::Format { .. }));
    }
}

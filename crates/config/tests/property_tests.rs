//! Property-based tests for the URL decomposer.
//!
//! These tests generate structurally valid connection URLs and verify that
//! decomposition extracts every component faithfully and coerces query
//! values to their natural scalar type.

use proptest::prelude::*;
use serde_json::json;

use dbconn_config::decompose_url;

fn driver_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("postgres".to_string()),
        Just("mysql".to_string()),
        Just("mongodb".to_string()),
        Just("redis".to_string()),
    ]
}

fn host_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("localhost".to_string()),
        "[a-z][a-z0-9]{1,10}\\.(example|test|local)".prop_map(String::from),
    ]
}

fn credential_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{1,8}".prop_map(String::from)
}

fn database_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{1,12}".prop_map(String::from)
}

proptest! {
    #[test]
    fn credentialed_urls_decompose_losslessly(
        driver in driver_strategy(),
        user in credential_strategy(),
        password in credential_strategy(),
        host in host_strategy(),
        port in 1024u16..=65535,
        database in database_strategy(),
    ) {
        let url = format!("{driver}://{user}:{password}@{host}:{port}/{database}");
        let settings = decompose_url(&url).unwrap();

        prop_assert_eq!(&settings["driver"], &json!(driver));
        prop_assert_eq!(&settings["user"], &json!(user));
        prop_assert_eq!(&settings["password"], &json!(password));
        prop_assert_eq!(&settings["host"], &json!(host));
        prop_assert_eq!(&settings["port"], &json!(port));
        prop_assert_eq!(&settings["database"], &json!(database));
    }

    #[test]
    fn query_values_coerce_by_literal_text(
        host in host_strategy(),
        pool in 0i64..=100_000,
        secure in any::<bool>(),
        label in "[a-z]{1,8}",
    ) {
        // Skip the two literals that coerce to booleans instead of strings.
        prop_assume!(label != "true" && label != "false");

        let url = format!("postgres://{host}/db?pool={pool}&secure={secure}&label={label}");
        let settings = decompose_url(&url).unwrap();

        prop_assert_eq!(&settings["pool"], &json!(pool));
        prop_assert_eq!(&settings["secure"], &json!(secure));
        prop_assert_eq!(&settings["label"], &json!(label));
    }

    #[test]
    fn decomposition_is_deterministic(
        driver in driver_strategy(),
        host in host_strategy(),
        database in database_strategy(),
    ) {
        let url = format!("{driver}://{host}/{database}?ssl=true");
        let first = decompose_url(&url).unwrap();
        let second = decompose_url(&url).unwrap();
        prop_assert_eq!(first, second);
    }
}

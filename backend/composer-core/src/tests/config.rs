use crate::config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT,
};

use std::time::Duration;

#[test]
fn given_default_config_when_validating_then_ok() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(config.retry_delay, DEFAULT_RETRY_DELAY);
    assert!(config.validate().is_ok());
}

/// **VALUE**: Verifies each invalid field is rejected with a readable reason.
///
/// **WHY THIS MATTERS**: A zero attempt budget would never send anything and a
/// schemeless base URL fails later with an opaque join error.
///
/// **BUG THIS CATCHES**: Validation silently accepting values the transport cannot use.
#[test]
fn given_invalid_values_when_validating_then_reason_names_the_field() {
    let cases = [
        (ClientConfig::default().with_base_url(""), "base_url cannot be empty"),
        (
            ClientConfig::default().with_base_url("cursor.com"),
            "Invalid base URL format: cursor.com",
        ),
        (
            ClientConfig::default().with_max_attempts(0),
            "max_attempts must be at least 1",
        ),
        (
            ClientConfig::default().with_timeout(Duration::ZERO),
            "timeout must be greater than zero",
        ),
    ];

    for (config, expected) in cases {
        let error = config.validate().unwrap_err();
        assert_eq!(error.reason(), expected);
    }
}

#[test]
fn given_builder_methods_when_chained_then_fields_are_set() {
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:9000")
        .with_timeout(Duration::from_secs(5))
        .with_max_attempts(5)
        .with_retry_delay(Duration::from_millis(20));

    assert_eq!(config.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.retry_delay, Duration::from_millis(20));
}

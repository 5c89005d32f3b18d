use crate::error::CliError;
use crate::settings::{
    COOKIES_FILE_NAME, ENV_BASE_URL, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_MAX_RETRIES,
    ENV_REQUEST_TIMEOUT, ENV_RETRY_DELAY, ENV_SESSION_TOKEN, Settings, resolve_token,
};

use composer_core::config::{DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT};

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use serial_test::serial;
use tempfile::TempDir;

fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, CliError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|name| vars.get(name).cloned())
}

fn clear_token_env() {
    // SAFETY: tests touching the process environment are serialized.
    unsafe { std::env::remove_var(ENV_SESSION_TOKEN) };
}

fn set_token_env(value: &str) {
    // SAFETY: tests touching the process environment are serialized.
    unsafe { std::env::set_var(ENV_SESSION_TOKEN, value) };
}

fn write_cookies(dir: &TempDir, contents: &str) {
    fs::write(dir.path().join(COOKIES_FILE_NAME), contents).unwrap();
}

#[test]
fn given_empty_environment_when_loading_settings_then_defaults_apply() {
    let settings = settings_from(&[]).unwrap();

    assert_eq!(settings.client.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.client.timeout, DEFAULT_TIMEOUT);
    assert_eq!(settings.client.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(settings.log_level, LevelFilter::Info);
}

#[test]
fn given_overrides_when_loading_settings_then_values_are_used() {
    let settings = settings_from(&[
        (ENV_BASE_URL, "http://localhost:8080/"),
        (ENV_REQUEST_TIMEOUT, "1500"),
        (ENV_MAX_RETRIES, "5"),
        (ENV_RETRY_DELAY, "250"),
        (ENV_LOG_LEVEL, "warn"),
        (ENV_LOG_DIR, "/tmp/composer-logs"),
    ])
    .unwrap();

    assert_eq!(settings.client.base_url, "http://localhost:8080");
    assert_eq!(settings.client.timeout, Duration::from_millis(1500));
    assert_eq!(settings.client.max_attempts, 5);
    assert_eq!(settings.client.retry_delay, Duration::from_millis(250));
    assert_eq!(settings.log_level, LevelFilter::Warn);
    assert_eq!(settings.log_dir, Some(PathBuf::from("/tmp/composer-logs")));
}

#[test]
fn given_blank_values_when_loading_settings_then_they_count_as_unset() {
    let settings = settings_from(&[(ENV_BASE_URL, "  "), (ENV_MAX_RETRIES, "")]).unwrap();

    assert_eq!(settings.client.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.client.max_attempts, DEFAULT_MAX_ATTEMPTS);
}

/// **VALUE**: Bad numbers and levels fail at startup with the variable named.
///
/// **BUG THIS CATCHES**: A typo in `REQUEST_TIMEOUT` silently falling back to
/// the default instead of telling the user.
#[test]
fn given_invalid_values_when_loading_settings_then_config_error_names_variable() {
    let cases = [
        (ENV_REQUEST_TIMEOUT, "soon", ENV_REQUEST_TIMEOUT),
        (ENV_MAX_RETRIES, "-1", ENV_MAX_RETRIES),
        (ENV_LOG_LEVEL, "loud", ENV_LOG_LEVEL),
    ];

    for (name, value, expected) in cases {
        let error = settings_from(&[(name, value)]).unwrap_err();
        assert!(matches!(error, CliError::Config { .. }));
        assert!(error.user_message().contains(expected), "{error}");
    }
}

#[test]
fn given_zero_retries_when_loading_settings_then_validation_rejects_it() {
    let error = settings_from(&[(ENV_MAX_RETRIES, "0")]).unwrap_err();

    assert_eq!(error.user_message(), "max_attempts must be at least 1");
}

#[test]
fn given_non_http_base_url_when_loading_settings_then_validation_rejects_it() {
    let error = settings_from(&[(ENV_BASE_URL, "ftp://cursor.com")]).unwrap_err();

    assert!(matches!(error, CliError::Config { .. }));
}

#[test]
fn given_verbose_flag_when_resolving_level_then_debug_wins() {
    let settings = settings_from(&[(ENV_LOG_LEVEL, "error")]).unwrap();

    assert_eq!(settings.effective_level(true), LevelFilter::Debug);
    assert_eq!(settings.effective_level(false), LevelFilter::Error);
}

/// **VALUE**: The explicit flag beats both the environment and cookies.json.
#[test]
#[serial]
fn given_flag_env_and_cookies_when_resolving_token_then_flag_wins() {
    let dir = TempDir::new().unwrap();
    write_cookies(&dir, r#"[{"name":"WorkosCursorSessionToken","value":"from-cookies"}]"#);
    set_token_env("from-env");

    let token = resolve_token(Some("from-flag"), dir.path()).unwrap();

    assert_eq!(token.as_str(), "from-flag");
    clear_token_env();
}

#[test]
#[serial]
fn given_env_and_cookies_when_resolving_token_then_env_wins() {
    let dir = TempDir::new().unwrap();
    write_cookies(&dir, r#"[{"name":"WorkosCursorSessionToken","value":"from-cookies"}]"#);
    set_token_env("from-env");

    let token = resolve_token(None, dir.path()).unwrap();

    assert_eq!(token.as_str(), "from-env");
    clear_token_env();
}

#[test]
#[serial]
fn given_only_cookies_when_resolving_token_then_session_cookie_is_used() {
    let dir = TempDir::new().unwrap();
    write_cookies(
        &dir,
        r#"[
            {"name":"NEXT_LOCALE","value":"en"},
            {"name":"WorkosCursorSessionToken","value":"from-cookies","domain":"cursor.com"}
        ]"#,
    );
    clear_token_env();

    let token = resolve_token(Some("   "), dir.path()).unwrap();

    assert_eq!(token.as_str(), "from-cookies");
}

/// **VALUE**: Missing credentials fail before any request with both sources named.
///
/// **WHY THIS MATTERS**: Every remote call needs the cookie; sending an empty
/// one only produces a confusing 401 later.
#[test]
#[serial]
fn given_no_source_when_resolving_token_then_error_names_both_sources() {
    let dir = TempDir::new().unwrap();
    clear_token_env();

    let error = resolve_token(None, dir.path()).unwrap_err();

    assert!(matches!(error, CliError::Credential { .. }));
    assert!(error.user_message().contains("CURSOR_SESSION_TOKEN"));
    assert!(error.user_message().contains("cookies.json"));
}

#[test]
#[serial]
fn given_cookies_without_session_entry_when_resolving_token_then_credential_error() {
    let dir = TempDir::new().unwrap();
    write_cookies(&dir, r#"[{"name":"NEXT_LOCALE","value":"en"}]"#);
    clear_token_env();

    let error = resolve_token(None, dir.path()).unwrap_err();

    assert!(matches!(error, CliError::Credential { .. }));
}

#[test]
#[serial]
fn given_malformed_cookies_when_resolving_token_then_parse_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    write_cookies(&dir, "{not json");
    clear_token_env();

    let error = resolve_token(None, dir.path()).unwrap_err();

    assert!(error.user_message().starts_with("Failed to parse"));
}

//! Environment-driven configuration for the `composer` binary.

use crate::error::CliError;

use composer_core::ClientConfig;

use common::SessionToken;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::{LevelFilter, debug};
use serde::Deserialize;

pub const ENV_SESSION_TOKEN: &str = "CURSOR_SESSION_TOKEN";
pub const ENV_BASE_URL: &str = "CURSOR_BASE_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "MAX_RETRIES";
pub const ENV_RETRY_DELAY: &str = "RETRY_DELAY";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "COMPOSER_LOG_DIR";

pub const COOKIES_FILE_NAME: &str = "cookies.json";
pub const SESSION_COOKIE_NAME: &str = "WorkosCursorSessionToken";

const APP_DIR_NAME: &str = "composer";

const MISSING_TOKEN_MESSAGE: &str = "Session token not found. Set CURSOR_SESSION_TOKEN environment variable or provide cookies.json";

/// Everything the binary reads from the environment, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client: ClientConfig,
    pub log_level: LevelFilter,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut client = ClientConfig::default();

        if let Some(base_url) = read(ENV_BASE_URL) {
            client = client.with_base_url(base_url.trim().trim_end_matches('/'));
        }
        if let Some(raw) = read(ENV_REQUEST_TIMEOUT) {
            client = client.with_timeout(Duration::from_millis(parse_number(ENV_REQUEST_TIMEOUT, &raw)?));
        }
        if let Some(raw) = read(ENV_MAX_RETRIES) {
            let attempts = parse_number(ENV_MAX_RETRIES, &raw)?;
            let attempts = u32::try_from(attempts)
                .map_err(|_| CliError::config(format!("{ENV_MAX_RETRIES} is too large: {raw}")))?;
            client = client.with_max_attempts(attempts);
        }
        if let Some(raw) = read(ENV_RETRY_DELAY) {
            client = client.with_retry_delay(Duration::from_millis(parse_number(ENV_RETRY_DELAY, &raw)?));
        }

        client
            .validate()
            .map_err(|e| CliError::config(e.reason()))?;

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(raw) => LevelFilter::from_str(raw.trim()).map_err(|_| {
                CliError::config(format!("{ENV_LOG_LEVEL} must be one of off, error, warn, info, debug, trace: {raw}"))
            })?,
            None => LevelFilter::Info,
        };

        let log_dir = read(ENV_LOG_DIR)
            .map(PathBuf::from)
            .or_else(default_log_dir);

        Ok(Self {
            client,
            log_level,
            log_dir,
        })
    }

    /// `--verbose` wins over `LOG_LEVEL`.
    pub fn effective_level(&self, verbose: bool) -> LevelFilter {
        if verbose {
            LevelFilter::Debug
        } else {
            self.log_level
        }
    }
}

fn parse_number(name: &str, raw: &str) -> Result<u64, CliError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| CliError::config(format!("{name} must be a non-negative integer: {raw}")))
}

/// Platform data directory for the log file.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Load a `.env` file from the working directory, then from next to the executable.
///
/// Runs before the logger exists, so the caller reports the returned path.
pub fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let candidate = env::current_exe()
        .ok()?
        .parent()?
        .join(".env");

    dotenvy::from_path(&candidate).ok().map(|()| candidate)
}

#[derive(Debug, Deserialize)]
struct CookieEntry {
    name: String,
    #[serde(default)]
    value: String,
}

/// Resolve the session credential.
///
/// Order: explicit flag, then `CURSOR_SESSION_TOKEN`, then the
/// `WorkosCursorSessionToken` entry of `cookies.json` in `cookies_dir`.
///
/// # Errors
///
/// [`CliError::Credential`] when no source yields a non-empty token or
/// `cookies.json` exists but cannot be read.
pub fn resolve_token(flag: Option<&str>, cookies_dir: &Path) -> Result<SessionToken, CliError> {
    if let Some(token) = flag.filter(|t| !t.trim().is_empty()) {
        debug!("Using session token from --token");
        return into_token(token);
    }

    if let Some(token) = env::var(ENV_SESSION_TOKEN)
        .ok()
        .filter(|t| !t.trim().is_empty())
    {
        debug!("Using session token from {ENV_SESSION_TOKEN}");
        return into_token(&token);
    }

    let cookies_path = cookies_dir.join(COOKIES_FILE_NAME);
    if cookies_path.exists() {
        if let Some(token) = read_cookie_token(&cookies_path)? {
            debug!("Using session token from {}", cookies_path.display());
            return into_token(&token);
        }
    }

    Err(CliError::credential(MISSING_TOKEN_MESSAGE))
}

fn read_cookie_token(path: &Path) -> Result<Option<String>, CliError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::credential(format!("Failed to read {}: {e}", path.display())))?;

    let entries: Vec<CookieEntry> = serde_json::from_str(&raw)
        .map_err(|e| CliError::credential(format!("Failed to parse {}: {e}", path.display())))?;

    Ok(entries
        .into_iter()
        .find(|entry| entry.name == SESSION_COOKIE_NAME)
        .map(|entry| entry.value)
        .filter(|value| !value.trim().is_empty()))
}

fn into_token(raw: &str) -> Result<SessionToken, CliError> {
    SessionToken::new(raw.trim()).map_err(|_| CliError::credential(MISSING_TOKEN_MESSAGE))
}

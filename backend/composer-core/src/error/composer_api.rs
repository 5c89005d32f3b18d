//! The single error type raised by the request-execution core.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses the error category, not message content
//! - `status_code()` is 0 whenever no response was received
//! - All errors include ErrorLocation for debugging

use crate::error::config::ConfigError;

use common::{ErrorLocation, HttpStatusCode, RedactError};
use models::ModelError;

use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ComposerApiError {
    /// No response was received (connection failure, timeout, DNS).
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    /// The remote answered with a status of 400 or above.
    #[error("Remote Error: HTTP {status_code} - {message} {location}")]
    Remote {
        message: String,
        status_code: HttpStatusCode,
        response_body: Option<Value>,
        location: ErrorLocation,
    },

    /// Every candidate path answered 404.
    #[error("Endpoint Resolution Error: {message} {location}")]
    ResolutionExhausted {
        message: String,
        candidates: Vec<String>,
        location: ErrorLocation,
    },

    /// The caller omitted a required identifier or field; nothing was sent.
    #[error("Precondition Error: {message} {location}")]
    Precondition {
        message: String,
        location: ErrorLocation,
    },

    /// A 2xx body could not be read as the declared result type.
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    /// The client could not be constructed (bad base URL, header, TLS setup).
    #[error("Setup Error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}

impl ComposerApiError {
    #[track_caller]
    pub fn precondition(message: impl Into<String>) -> Self {
        ComposerApiError::Precondition {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn setup(message: impl Into<String>) -> Self {
        ComposerApiError::Setup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from an HTTP response with explicit status code.
    #[track_caller]
    pub fn remote(status_code: u16, response_body: Option<Value>) -> Self {
        ComposerApiError::Remote {
            message: format!("Request failed with status code {status_code}"),
            status_code: HttpStatusCode(status_code),
            response_body,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn resolution_exhausted(candidates: &[&str]) -> Self {
        ComposerApiError::ResolutionExhausted {
            message: format!(
                "No working endpoint found after trying {} candidate(s)",
                candidates.len()
            ),
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error that occurred before a status was available.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        if error.is_builder() {
            return ComposerApiError::Setup {
                message: format!("Request could not be built: {error}"),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        ComposerApiError::Transport {
            message: format!("Request failed: {error}"),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status of the failed response, or 0 when no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            ComposerApiError::Remote { status_code, .. } => status_code.0,
            _ => 0,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ComposerApiError::Transport { message, .. }
            | ComposerApiError::Remote { message, .. }
            | ComposerApiError::ResolutionExhausted { message, .. }
            | ComposerApiError::Precondition { message, .. }
            | ComposerApiError::Decode { message, .. }
            | ComposerApiError::Setup { message, .. } => message,
        }
    }

    /// Parsed body of the failed response, when the remote sent one.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            ComposerApiError::Remote { response_body, .. } => response_body.as_ref(),
            _ => None,
        }
    }

    /// Network-level failures and 5xx responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ComposerApiError::Transport { .. } => true,
            ComposerApiError::Remote { status_code, .. } => status_code.is_retryable(),
            ComposerApiError::ResolutionExhausted { .. } => false,
            ComposerApiError::Precondition { .. } => false,
            ComposerApiError::Decode { .. } => false,
            ComposerApiError::Setup { .. } => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ComposerApiError::Remote { status_code, .. } if status_code.is_not_found())
    }

    /// Get error category for logs and tool output.
    pub fn error_category(&self) -> &'static str {
        match self {
            ComposerApiError::Transport { is_timeout: true, .. } => "timeout",
            ComposerApiError::Transport { is_connection: true, .. } => "connection",
            ComposerApiError::Transport { .. } => "transport",
            ComposerApiError::Remote { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            ComposerApiError::Remote { .. } => "remote_rejection",
            ComposerApiError::ResolutionExhausted { .. } => "resolution_exhausted",
            ComposerApiError::Precondition { .. } => "precondition",
            ComposerApiError::Decode { .. } => "decode",
            ComposerApiError::Setup { .. } => "setup",
        }
    }

    /// Category label plus message, without the source location.
    ///
    /// This is the text shown to people (CLI stderr, tool results).
    pub fn describe(&self) -> String {
        match self {
            ComposerApiError::Transport { message, .. } => format!("Network Error: {message}"),
            ComposerApiError::Remote {
                message,
                status_code,
                ..
            } => format!("API Error ({status_code}): {message}"),
            ComposerApiError::ResolutionExhausted { message, .. } => {
                format!("Endpoint Resolution Error: {message}")
            }
            ComposerApiError::Precondition { message, .. } => {
                format!("Invalid Arguments: {message}")
            }
            ComposerApiError::Decode { message, .. } => format!("Decode Error: {message}"),
            ComposerApiError::Setup { message, .. } => format!("Configuration Error: {message}"),
        }
    }
}

impl From<url::ParseError> for ComposerApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ComposerApiError::Setup {
            message: format!("Invalid URL: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ComposerApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ComposerApiError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for ComposerApiError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        ComposerApiError::Setup {
            message: error.reason().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ComposerApiError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ComposerApiError::Precondition {
            message: error.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<RedactError> for ComposerApiError {
    #[track_caller]
    fn from(error: RedactError) -> Self {
        let message = match error {
            RedactError::Empty { message, .. } => message,
            RedactError::Serialization { message, .. } => message,
        };

        ComposerApiError::Precondition {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

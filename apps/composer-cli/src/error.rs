use composer_core::ComposerApiError;
use composer_core::error::tool::ToolError;

use common::ErrorLocation;

use std::panic::Location;

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the `composer` binary.
///
/// Every variant ends the process with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid environment or flag values.
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// No usable session token was found.
    #[error("Credential Error: {message} {location}")]
    Credential {
        message: String,
        location: ErrorLocation,
    },

    /// A remote operation failed.
    #[error("Api Error: {message} {location}")]
    Api {
        message: String,
        status_code: u16,
        response_body: Option<Value>,
        location: ErrorLocation,
    },

    /// Tool-protocol request could not be served.
    #[error("Tool Error: {message} {location}")]
    Tool {
        message: String,
        location: ErrorLocation,
    },

    /// Reading or writing stdio, files or the log sink failed.
    #[error("Io Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn config(message: impl Into<String>) -> Self {
        CliError::Config {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credential(message: impl Into<String>) -> Self {
        CliError::Credential {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(message: impl Into<String>) -> Self {
        CliError::Io {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text printed to stderr before exiting.
    pub fn user_message(&self) -> &str {
        match self {
            CliError::Config { message, .. }
            | CliError::Credential { message, .. }
            | CliError::Api { message, .. }
            | CliError::Tool { message, .. }
            | CliError::Io { message, .. } => message,
        }
    }

    /// Upstream body of a failed remote call, shown with `--verbose`.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            CliError::Api { response_body, .. } => response_body.as_ref(),
            _ => None,
        }
    }
}

impl From<ComposerApiError> for CliError {
    #[track_caller]
    fn from(error: ComposerApiError) -> Self {
        CliError::Api {
            message: error.describe(),
            status_code: error.status_code(),
            response_body: error.response_body().cloned(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ToolError> for CliError {
    #[track_caller]
    fn from(error: ToolError) -> Self {
        CliError::Tool {
            message: error.message(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for CliError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        CliError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        CliError::Io {
            message: format!("Failed to render output: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

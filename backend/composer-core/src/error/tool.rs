use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Protocol-level failures of the tool adapter.
///
/// Failures of the underlying operation are not errors here: they are
/// rendered into the tool's text output instead.
#[derive(Debug, ThisError)]
pub enum ToolError {
    #[error("Unknown Tool Error: {name} {location}")]
    UnknownTool {
        name: String,
        location: ErrorLocation,
    },

    #[error("Unknown Resource Error: {uri} {location}")]
    UnknownResource {
        uri: String,
        location: ErrorLocation,
    },

    #[error("Unknown Prompt Error: {name} {location}")]
    UnknownPrompt {
        name: String,
        location: ErrorLocation,
    },

    #[error("Invalid Arguments Error: {message} {location}")]
    InvalidArguments {
        message: String,
        location: ErrorLocation,
    },
}

impl ToolError {
    #[track_caller]
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        ToolError::UnknownTool {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_resource(uri: impl Into<String>) -> Self {
        ToolError::UnknownResource {
            uri: uri.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_prompt(name: impl Into<String>) -> Self {
        ToolError::UnknownPrompt {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        ToolError::InvalidArguments {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ToolError::UnknownTool { name, .. } => format!("Unknown tool: {name}"),
            ToolError::UnknownResource { uri, .. } => format!("Unknown resource: {uri}"),
            ToolError::UnknownPrompt { name, .. } => format!("Unknown prompt: {name}"),
            ToolError::InvalidArguments { message, .. } => message.clone(),
        }
    }
}

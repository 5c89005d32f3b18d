use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    pub fn reason(&self) -> &str {
        match self {
            ConfigError::ValidationError { reason, .. } => reason,
        }
    }
}

//! One adapter per remote subsystem, all sharing a single transport.

pub mod composer;
pub mod dashboard;
pub mod user;

pub use composer::ComposerService;
pub use dashboard::DashboardService;
pub use user::UserService;

use crate::error::composer_api::ComposerApiError;
use crate::transport::{RequestDescriptor, TransportExecutor};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Execute and decode into the declared result type.
pub(crate) async fn send<T: DeserializeOwned>(
    transport: &TransportExecutor,
    descriptor: RequestDescriptor,
) -> Result<T, ComposerApiError> {
    let value = transport.execute(&descriptor).await?;
    decode(value)
}

/// Decode a 2xx body. An empty body decodes as `{}` so every field reads as absent.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ComposerApiError> {
    let value = match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    Ok(serde_json::from_value(value)?)
}

#[track_caller]
pub(crate) fn require_id<'a>(name: &str, value: &'a str) -> Result<&'a str, ComposerApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ComposerApiError::precondition(format!("{name} is required")));
    }
    Ok(trimmed)
}

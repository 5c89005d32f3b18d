use crate::client::BackgroundComposerClient;
use crate::error::tool::ToolError;

use serde::Serialize;
use serde_json::json;

pub const API_STATUS_URI: &str = "cursor://api/status";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

pub fn definitions() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: API_STATUS_URI,
        name: "api-status",
        description: "Current status of the Cursor API client",
        mime_type: JSON_MIME_TYPE,
    }]
}

/// Runs the endpoint probe and returns its report as pretty JSON.
pub async fn read(
    client: &BackgroundComposerClient,
    uri: &str,
) -> Result<ResourceContents, ToolError> {
    if uri != API_STATUS_URI {
        return Err(ToolError::unknown_resource(uri));
    }

    let report = client.test_all_endpoints().await;
    let text = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        json!({ "success": false, "error": e.to_string() }).to_string()
    });

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: String::from(JSON_MIME_TYPE),
        text,
    })
}

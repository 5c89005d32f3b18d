//! Argument shapes for each tool. Doc comments become schema descriptions.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComposerArgs {
    /// Task description (prompt for the AI)
    pub task_description: String,
    /// Repository URL (e.g., https://github.com/owner/repo.git)
    pub repository_url: String,
    /// Branch name (defaults to main)
    pub branch: Option<String>,
    /// Model to use (defaults to claude-4-sonnet-thinking)
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListComposersArgs {
    /// Number of composers to return (defaults to 10)
    pub limit: Option<u32>,
    /// Include status information (defaults to true)
    pub include_status: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComposerIdArgs {
    /// Background composer ID
    pub composer_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenPrArgs {
    /// Background composer ID
    pub composer_id: String,
    /// Extra pull request fields forwarded as-is
    #[serde(default)]
    pub pr_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevertFileArgs {
    /// Background composer ID
    pub composer_id: String,
    /// Path of the file to revert, relative to the workspace root
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachComposerArgs {
    /// Background composer ID
    pub composer_id: String,
    /// Extra attachment fields forwarded as-is
    #[serde(default)]
    pub attachment: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSettingsArgs {
    /// Settings to change, keyed by their camel-case names
    pub settings: Map<String, Value>,
}

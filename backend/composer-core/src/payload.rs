//! Create-composer request body.
//!
//! The remote expects the shape its own web client sends; only the task,
//! repository, branch, model and generated id vary between calls.

use models::CreateComposerOptions;

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

const COMPOSER_ID_PREFIX: &str = "bc-";
const WORKSPACE_ROOT_PATH: &str = "/workspace";
const HUMAN_MESSAGE_TYPE: &str = "MESSAGE_TYPE_HUMAN";
const WEBSITE_SOURCE: &str = "BACKGROUND_COMPOSER_SOURCE_WEBSITE";

/// Source of fresh composer identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// `bc-` followed by a random v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        format!("{COMPOSER_ID_PREFIX}{}", Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerPayload {
    pub snapshot_name_or_id: String,
    pub devcontainer_starting_point: DevcontainerStartingPoint,
    pub model_details: ModelDetails,
    pub repository_info: Value,
    pub snapshot_workspace_root_path: String,
    pub auto_branch: bool,
    pub return_immediately: bool,
    pub repo_url: String,
    pub conversation_history: Vec<ConversationMessage>,
    pub source: String,
    pub bc_id: String,
    pub add_initial_message_to_responses: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevcontainerStartingPoint {
    pub url: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDetails {
    pub model_name: String,
    pub max_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub text: String,
    #[serde(rename = "type")]
    pub message_type: String,
    /// Serialized rich-text document (a string, not an object).
    pub rich_text: String,
}

/// Build the create body from validated caller intent.
///
/// `snapshotNameOrId` and `repoUrl` carry the URL without protocol or `.git`;
/// the devcontainer URL keeps the protocol. `bcId` is the only generated value.
pub fn build_composer_payload(
    options: &CreateComposerOptions,
    ids: &dyn IdGenerator,
) -> ComposerPayload {
    let devcontainer_url = strip_git_suffix(options.repository_url());
    let repo_id = strip_protocol(devcontainer_url);
    let task = options.task_description();

    ComposerPayload {
        snapshot_name_or_id: repo_id.to_string(),
        devcontainer_starting_point: DevcontainerStartingPoint {
            url: devcontainer_url.to_string(),
            git_ref: options.branch().to_string(),
        },
        model_details: ModelDetails {
            model_name: options.model().to_string(),
            max_mode: true,
        },
        repository_info: json!({}),
        snapshot_workspace_root_path: String::from(WORKSPACE_ROOT_PATH),
        auto_branch: true,
        return_immediately: true,
        repo_url: repo_id.to_string(),
        conversation_history: vec![ConversationMessage {
            text: task.to_string(),
            message_type: String::from(HUMAN_MESSAGE_TYPE),
            rich_text: rich_text_document(task),
        }],
        source: String::from(WEBSITE_SOURCE),
        bc_id: ids.next_id(),
        add_initial_message_to_responses: true,
    }
}

/// `https://host/path` -> `host/path`.
pub fn strip_protocol(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Drops trailing slashes and a trailing `.git`.
pub fn strip_git_suffix(url: &str) -> &str {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed.strip_suffix(".git").unwrap_or(trimmed)
}

/// Single-paragraph editor document holding `text`, serialized to a string.
fn rich_text_document(text: &str) -> String {
    json!({
        "root": {
            "children": [{
                "children": [{
                    "detail": 0,
                    "format": 0,
                    "mode": "normal",
                    "style": "",
                    "text": text,
                    "type": "text",
                    "version": 1
                }],
                "direction": "ltr",
                "format": "",
                "indent": 0,
                "type": "paragraph",
                "version": 1,
                "textFormat": 0,
                "textStyle": ""
            }],
            "direction": "ltr",
            "format": "",
            "indent": 0,
            "type": "root",
            "version": 1
        }
    })
    .to_string()
}

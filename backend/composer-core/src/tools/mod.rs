//! Tool-protocol adapter: one tool per facade operation, plus the api-status
//! resource and the composer prompt template.
//!
//! Operation failures become `is_error` text, never protocol errors. Only an
//! unknown name or undecodable arguments is a [`ToolError`].

pub mod args;
pub mod prompts;
pub mod resources;

use crate::client::BackgroundComposerClient;
use crate::error::composer_api::ComposerApiError;
use crate::error::tool::ToolError;
use crate::normalizer;

use args::{
    AttachComposerArgs, ComposerIdArgs, CreateComposerArgs, ListComposersArgs, NoArgs,
    OpenPrArgs, RevertFileArgs, UpdateUserSettingsArgs,
};
use models::{CreateComposerOptionsBuilder, NormalizedResponse, UserSettings};

use std::sync::Arc;

use log::{debug, warn};
use schemars::{JsonSchema, schema_for};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Default page size for the list tool.
pub const DEFAULT_TOOL_LIST_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerTool {
    CreateBackgroundComposer,
    ListBackgroundComposers,
    GetComposerDetails,
    GetDiffDetails,
    GetChangesHash,
    OpenPullRequest,
    PauseComposer,
    RevertFile,
    AttachComposer,
    AttachComposerLogs,
    CheckWebAccess,
    GetUserSettings,
    UpdateUserSettings,
    GetPrivacyMode,
}

impl ComposerTool {
    pub const ALL: [ComposerTool; 14] = [
        ComposerTool::CreateBackgroundComposer,
        ComposerTool::ListBackgroundComposers,
        ComposerTool::GetComposerDetails,
        ComposerTool::GetDiffDetails,
        ComposerTool::GetChangesHash,
        ComposerTool::OpenPullRequest,
        ComposerTool::PauseComposer,
        ComposerTool::RevertFile,
        ComposerTool::AttachComposer,
        ComposerTool::AttachComposerLogs,
        ComposerTool::CheckWebAccess,
        ComposerTool::GetUserSettings,
        ComposerTool::UpdateUserSettings,
        ComposerTool::GetPrivacyMode,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ComposerTool::CreateBackgroundComposer => "create-background-composer",
            ComposerTool::ListBackgroundComposers => "list-background-composers",
            ComposerTool::GetComposerDetails => "get-composer-details",
            ComposerTool::GetDiffDetails => "get-diff-details",
            ComposerTool::GetChangesHash => "get-changes-hash",
            ComposerTool::OpenPullRequest => "open-pull-request",
            ComposerTool::PauseComposer => "pause-composer",
            ComposerTool::RevertFile => "revert-file",
            ComposerTool::AttachComposer => "attach-composer",
            ComposerTool::AttachComposerLogs => "attach-composer-logs",
            ComposerTool::CheckWebAccess => "check-web-access",
            ComposerTool::GetUserSettings => "get-user-settings",
            ComposerTool::UpdateUserSettings => "update-user-settings",
            ComposerTool::GetPrivacyMode => "get-privacy-mode",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ComposerTool::CreateBackgroundComposer => "Create Background Composer",
            ComposerTool::ListBackgroundComposers => "List Background Composers",
            ComposerTool::GetComposerDetails => "Get Composer Details",
            ComposerTool::GetDiffDetails => "Get Diff Details",
            ComposerTool::GetChangesHash => "Get Changes Hash",
            ComposerTool::OpenPullRequest => "Open Pull Request",
            ComposerTool::PauseComposer => "Pause Composer",
            ComposerTool::RevertFile => "Revert File",
            ComposerTool::AttachComposer => "Attach Composer",
            ComposerTool::AttachComposerLogs => "Attach Composer Logs",
            ComposerTool::CheckWebAccess => "Check Web Access",
            ComposerTool::GetUserSettings => "Get User Settings",
            ComposerTool::UpdateUserSettings => "Update User Settings",
            ComposerTool::GetPrivacyMode => "Get Privacy Mode",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ComposerTool::CreateBackgroundComposer => {
                "Create a new background composer task in Cursor"
            }
            ComposerTool::ListBackgroundComposers => {
                "List all background composers with their status"
            }
            ComposerTool::GetComposerDetails => {
                "Get detailed information about a specific background composer"
            }
            ComposerTool::GetDiffDetails => "Get the diff produced by a background composer",
            ComposerTool::GetChangesHash => "Get the hash of a background composer's changes",
            ComposerTool::OpenPullRequest => {
                "Open a pull request from a background composer's changes"
            }
            ComposerTool::PauseComposer => "Pause a running background composer",
            ComposerTool::RevertFile => "Revert one file changed by a background composer",
            ComposerTool::AttachComposer => "Attach to a background composer",
            ComposerTool::AttachComposerLogs => "Attach to a background composer's logs",
            ComposerTool::CheckWebAccess => "Check if the agent has web access enabled",
            ComposerTool::GetUserSettings => "Get current user settings",
            ComposerTool::UpdateUserSettings => "Update background composer user settings",
            ComposerTool::GetPrivacyMode => "Get current privacy mode settings",
        }
    }

    /// Lower-case phrase used in failure text: `"Failed to <action>: ..."`.
    pub fn action(self) -> &'static str {
        match self {
            ComposerTool::CreateBackgroundComposer => "create background composer",
            ComposerTool::ListBackgroundComposers => "list background composers",
            ComposerTool::GetComposerDetails => "get composer details",
            ComposerTool::GetDiffDetails => "get diff details",
            ComposerTool::GetChangesHash => "get changes hash",
            ComposerTool::OpenPullRequest => "open pull request",
            ComposerTool::PauseComposer => "pause composer",
            ComposerTool::RevertFile => "revert file",
            ComposerTool::AttachComposer => "attach composer",
            ComposerTool::AttachComposerLogs => "attach composer logs",
            ComposerTool::CheckWebAccess => "check web access",
            ComposerTool::GetUserSettings => "get user settings",
            ComposerTool::UpdateUserSettings => "update user settings",
            ComposerTool::GetPrivacyMode => "get privacy mode",
        }
    }

    pub fn input_schema(self) -> Value {
        match self {
            ComposerTool::CreateBackgroundComposer => schema::<CreateComposerArgs>(),
            ComposerTool::ListBackgroundComposers => schema::<ListComposersArgs>(),
            ComposerTool::GetComposerDetails
            | ComposerTool::GetDiffDetails
            | ComposerTool::GetChangesHash
            | ComposerTool::PauseComposer
            | ComposerTool::AttachComposerLogs => schema::<ComposerIdArgs>(),
            ComposerTool::OpenPullRequest => schema::<OpenPrArgs>(),
            ComposerTool::RevertFile => schema::<RevertFileArgs>(),
            ComposerTool::AttachComposer => schema::<AttachComposerArgs>(),
            ComposerTool::UpdateUserSettings => schema::<UpdateUserSettingsArgs>(),
            ComposerTool::CheckWebAccess
            | ComposerTool::GetUserSettings
            | ComposerTool::GetPrivacyMode => schema::<NoArgs>(),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            title: self.title(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// One text block returned from a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn failure(tool: ComposerTool, error: &ComposerApiError) -> Self {
        Self {
            text: format!("Failed to {}: {}", tool.action(), error.describe()),
            is_error: true,
        }
    }
}

/// Routes tool, resource and prompt requests to a shared client.
pub struct ComposerToolBox {
    client: Arc<BackgroundComposerClient>,
}

impl ComposerToolBox {
    pub fn new(client: Arc<BackgroundComposerClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &BackgroundComposerClient {
        &self.client
    }

    pub fn tools(&self) -> Vec<ToolDefinition> {
        ComposerTool::ALL.into_iter().map(ComposerTool::definition).collect()
    }

    pub fn resources(&self) -> Vec<resources::ResourceDefinition> {
        resources::definitions()
    }

    pub fn prompts(&self) -> Vec<prompts::PromptDefinition> {
        prompts::definitions()
    }

    pub async fn read_resource(&self, uri: &str) -> Result<resources::ResourceContents, ToolError> {
        resources::read(&self.client, uri).await
    }

    pub fn get_prompt(&self, name: &str, arguments: Value) -> Result<prompts::PromptMessage, ToolError> {
        prompts::get_prompt(name, arguments)
    }

    /// Invoke a tool by name.
    ///
    /// # Errors
    ///
    /// [`ToolError::UnknownTool`] for an unrecognized name and
    /// [`ToolError::InvalidArguments`] when the arguments do not decode.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = ComposerTool::from_name(name).ok_or_else(|| ToolError::unknown_tool(name))?;
        debug!("Calling tool {name}");

        let outcome = self.dispatch(tool, arguments).await?;

        Ok(match outcome {
            Ok(text) => ToolOutput::success(text),
            Err(error) => {
                warn!("Tool {name} failed: {error}");
                ToolOutput::failure(tool, &error)
            }
        })
    }

    async fn dispatch(
        &self,
        tool: ComposerTool,
        arguments: Value,
    ) -> Result<Result<String, ComposerApiError>, ToolError> {
        let client = &self.client;

        Ok(match tool {
            ComposerTool::CreateBackgroundComposer => {
                let args: CreateComposerArgs = decode_arguments(arguments)?;
                self.create(args).await
            }
            ComposerTool::ListBackgroundComposers => {
                let args: ListComposersArgs = decode_arguments(arguments)?;
                client
                    .list_composers_with(
                        args.limit.unwrap_or(DEFAULT_TOOL_LIST_LIMIT),
                        args.include_status.unwrap_or(true),
                    )
                    .await
                    .map(|list| normalizer::normalize_composer_list(&list).render())
            }
            ComposerTool::GetComposerDetails => {
                let args: ComposerIdArgs = decode_arguments(arguments)?;
                client
                    .get_detailed_composer(&args.composer_id)
                    .await
                    .map(|details| format!("Composer Details:\n\n{}", pretty(&details)))
            }
            ComposerTool::GetDiffDetails => {
                let args: ComposerIdArgs = decode_arguments(arguments)?;
                client.get_diff_details(&args.composer_id).await.map(|r| pretty(&r))
            }
            ComposerTool::GetChangesHash => {
                let args: ComposerIdArgs = decode_arguments(arguments)?;
                client.get_changes_hash(&args.composer_id).await.map(|r| pretty(&r))
            }
            ComposerTool::OpenPullRequest => {
                let args: OpenPrArgs = decode_arguments(arguments)?;
                client
                    .open_pr(&args.composer_id, args.pr_data.unwrap_or_default())
                    .await
                    .map(|r| pretty(&r))
            }
            ComposerTool::PauseComposer => {
                let args: ComposerIdArgs = decode_arguments(arguments)?;
                client.pause_composer(&args.composer_id).await.map(|r| pretty(&r))
            }
            ComposerTool::RevertFile => {
                let args: RevertFileArgs = decode_arguments(arguments)?;
                client
                    .revert_file(&args.composer_id, &args.file_path)
                    .await
                    .map(|r| pretty(&r))
            }
            ComposerTool::AttachComposer => {
                let args: AttachComposerArgs = decode_arguments(arguments)?;
                client
                    .attach_composer(&args.composer_id, args.attachment.unwrap_or_default())
                    .await
                    .map(|r| pretty(&r))
            }
            ComposerTool::AttachComposerLogs => {
                let args: ComposerIdArgs = decode_arguments(arguments)?;
                client
                    .attach_composer_logs(&args.composer_id)
                    .await
                    .map(|r| pretty(&r))
            }
            ComposerTool::CheckWebAccess => {
                let _: NoArgs = decode_arguments(arguments)?;
                client.check_web_access_parsed().await.map(|r| r.render())
            }
            ComposerTool::GetUserSettings => {
                let _: NoArgs = decode_arguments(arguments)?;
                client.get_user_settings_parsed().await.map(|r| r.render())
            }
            ComposerTool::UpdateUserSettings => {
                let args: UpdateUserSettingsArgs = decode_arguments(arguments)?;
                let settings = UserSettings::from_value(Value::Object(args.settings));
                client
                    .update_user_settings(&settings)
                    .await
                    .map(|updated| normalizer::normalize_user_settings(&updated).render())
            }
            ComposerTool::GetPrivacyMode => {
                let _: NoArgs = decode_arguments(arguments)?;
                client.get_privacy_mode_parsed().await.map(|r| r.render())
            }
        })
    }

    async fn create(&self, args: CreateComposerArgs) -> Result<String, ComposerApiError> {
        let mut builder = CreateComposerOptionsBuilder::default()
            .with_task_description(args.task_description)
            .with_repository_url(args.repository_url);
        if let Some(branch) = args.branch {
            builder = builder.with_branch(branch);
        }
        if let Some(model) = args.model {
            builder = builder.with_model(model);
        }
        let options = builder.build()?;

        let submission = self.client.create_composer(&options).await?;

        let summary = NormalizedResponse::new(
            "Background composer created successfully!",
            vec![
                format!("Composer ID: {}", submission.composer_id()),
                format!("Task: {}", options.task_description()),
                format!("Repository: {}", options.repository_url()),
                format!("Branch: {}", options.branch()),
                format!("Model: {}", options.model()),
            ],
        );

        Ok(format!("{}\n\n{}", summary.summary(), summary.details().join("\n")))
    }
}

/// Decode tool arguments; absent arguments read as an empty object.
pub(crate) fn decode_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(format!("Invalid arguments: {e}")))
}

fn schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_default()
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

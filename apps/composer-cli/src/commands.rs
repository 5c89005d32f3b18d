//! Executes one parsed subcommand against the client.

use crate::cli::Command;
use crate::error::CliError;
use crate::mcp::McpServer;
use crate::output::{self, OutputFormat};

use composer_core::normalizer;
use composer_core::{BackgroundComposerClient, ComposerApiError, ComposerToolBox};

use models::CreateComposerOptionsBuilder;

use std::sync::Arc;

use log::info;
use tokio::io::{BufReader, stdin, stdout};

/// Run `command` and return the text to print, if any.
///
/// `serve` writes its own output and returns `None`.
pub async fn execute(
    command: &Command,
    client: &Arc<BackgroundComposerClient>,
    format: OutputFormat,
) -> Result<Option<String>, CliError> {
    let text = match command {
        Command::List { limit } => {
            let list = client.list_composers_with(*limit, true).await?;
            output::render_normalized(&normalizer::normalize_composer_list(&list), format)?
        }
        Command::WebAccess => {
            output::render_normalized(&client.check_web_access_parsed().await?, format)?
        }
        Command::Privacy => {
            output::render_normalized(&client.get_privacy_mode_parsed().await?, format)?
        }
        Command::Settings => {
            output::render_normalized(&client.get_user_settings_parsed().await?, format)?
        }
        Command::Test => {
            info!("Testing all endpoints");
            output::render_probe(&client.test_all_endpoints().await, format)?
        }
        Command::Create {
            task_description,
            repository_url,
            branch,
            model,
        } => {
            let mut builder = CreateComposerOptionsBuilder::default()
                .with_task_description(task_description)
                .with_repository_url(repository_url);
            if let Some(branch) = branch {
                builder = builder.with_branch(branch);
            }
            if let Some(model) = model {
                builder = builder.with_model(model);
            }
            let options = builder.build().map_err(ComposerApiError::from)?;

            output::render_submission(&client.create_composer(&options).await?, format)?
        }
        Command::Details(target) => output::render_value(
            &client.get_detailed_composer(&target.composer_id).await?,
            format,
        )?,
        Command::Diff(target) => {
            output::render_value(&client.get_diff_details(&target.composer_id).await?, format)?
        }
        Command::Hash(target) => {
            output::render_value(&client.get_changes_hash(&target.composer_id).await?, format)?
        }
        Command::Pause(target) => {
            output::render_value(&client.pause_composer(&target.composer_id).await?, format)?
        }
        Command::Attach { target, data } => output::render_value(
            &client
                .attach_composer(&target.composer_id, data.clone().unwrap_or_default())
                .await?,
            format,
        )?,
        Command::AttachLogs(target) => output::render_value(
            &client.attach_composer_logs(&target.composer_id).await?,
            format,
        )?,
        Command::Revert { target, file } => output::render_value(
            &client.revert_file(&target.composer_id, file).await?,
            format,
        )?,
        Command::OpenPr { target, data } => output::render_value(
            &client
                .open_pr(&target.composer_id, data.clone().unwrap_or_default())
                .await?,
            format,
        )?,
        Command::Serve => {
            let server = McpServer::new(ComposerToolBox::new(Arc::clone(client)));
            server.serve(BufReader::new(stdin()), stdout()).await?;
            return Ok(None);
        }
    };

    Ok(Some(text))
}

use composer_cli::cli::Cli;
use composer_cli::commands::execute;
use composer_cli::error::CliError;
use composer_cli::logger::initialize as LoggerInitialize;
use composer_cli::settings::{Settings, resolve_token, try_load_dotenv};

use composer_core::BackgroundComposerClient;

use std::env::current_dir;
use std::fs::create_dir_all;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{}", err.user_message());
            if verbose {
                if let Some(body) = err.response_body() {
                    eprintln!("Response body: {body}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let dotenv_path = try_load_dotenv();
    let settings = Settings::from_env()?;

    // A log directory that cannot be created only costs the file sink.
    let log_dir = settings
        .log_dir
        .as_deref()
        .filter(|dir| create_dir_all(dir).is_ok());
    LoggerInitialize(settings.effective_level(cli.verbose), log_dir)?;
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }
    if log_dir.is_none() && settings.log_dir.is_some() {
        warn!("Log directory unavailable, logging to stderr only");
    }

    let token = resolve_token(cli.token.as_deref(), &current_dir()?)?;
    debug!("Base URL: {}", settings.client.base_url);

    let client = Arc::new(BackgroundComposerClient::new(token, &settings.client)?);

    if let Some(text) = execute(&cli.command, &client, cli.format).await? {
        println!("{text}");
    }

    Ok(())
}

use crate::output::OutputFormat;

use composer_core::services::composer::DEFAULT_LIST_SIZE;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

/// Command-line client for Cursor background composers.
#[derive(Parser, Debug)]
#[command(name = "composer", author, version, about)]
pub struct Cli {
    /// Session token (overrides CURSOR_SESSION_TOKEN and cookies.json)
    #[arg(short = 'T', long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Enable debug logging and print upstream error bodies
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List background composers
    List {
        /// Maximum number of composers to fetch
        #[arg(short, long, default_value_t = DEFAULT_LIST_SIZE)]
        limit: u32,
    },

    /// Check whether agents may access the web
    WebAccess,

    /// Show the account privacy mode
    Privacy,

    /// Show background composer user settings
    Settings,

    /// Probe every remote endpoint and report reachability
    Test,

    /// Start a new background composer
    Create {
        /// What the agent should do
        #[arg(short = 'd', long)]
        task_description: String,

        /// Repository to work in
        #[arg(short = 'r', long)]
        repository_url: String,

        /// Branch to start from (default: main)
        #[arg(short, long)]
        branch: Option<String>,

        /// Model to run (default: claude-4-sonnet-thinking)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show one composer in detail
    Details(ComposerIdArg),

    /// Show the diff produced by a composer
    Diff(ComposerIdArg),

    /// Show the changes hash of a composer
    Hash(ComposerIdArg),

    /// Pause a running composer
    Pause(ComposerIdArg),

    /// Attach to a composer
    Attach {
        #[command(flatten)]
        target: ComposerIdArg,

        /// Extra attachment fields as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        data: Option<Map<String, Value>>,
    },

    /// Attach to a composer's logs
    AttachLogs(ComposerIdArg),

    /// Revert one file in a composer's workspace
    Revert {
        #[command(flatten)]
        target: ComposerIdArg,

        /// Path of the file to revert
        #[arg(long)]
        file: String,
    },

    /// Open a pull request from a composer's branch
    OpenPr {
        #[command(flatten)]
        target: ComposerIdArg,

        /// Extra pull request fields as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        data: Option<Map<String, Value>>,
    },

    /// Serve the tool protocol over stdio
    Serve,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ComposerIdArg {
    /// Background composer id (bc-...)
    #[arg(long = "composer-id", visible_alias = "id")]
    pub composer_id: String,
}

fn parse_json_object(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(String::from("expected a JSON object")),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

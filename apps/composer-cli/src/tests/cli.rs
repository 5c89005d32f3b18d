use crate::cli::{Cli, Command, ComposerIdArg};
use crate::output::OutputFormat;

use clap::Parser;
use serde_json::json;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("composer").chain(args.iter().copied()))
}

#[test]
fn given_no_flags_when_parsing_list_then_defaults_apply() {
    let cli = parse(&["list"]).unwrap();

    assert_eq!(cli.command, Command::List { limit: 100 });
    assert_eq!(cli.format, OutputFormat::Table);
    assert!(!cli.verbose);
    assert!(cli.token.is_none());
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_they_apply() {
    let cli = parse(&["settings", "-f", "json", "-v", "-T", "tok"]).unwrap();

    assert_eq!(cli.command, Command::Settings);
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.verbose);
    assert_eq!(cli.token.as_deref(), Some("tok"));
}

#[test]
fn given_create_short_flags_when_parsing_then_fields_are_captured() {
    let cli = parse(&[
        "create",
        "-d",
        "Fix the flaky test",
        "-r",
        "https://github.com/acme/widgets.git",
        "-b",
        "develop",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Command::Create {
            task_description: String::from("Fix the flaky test"),
            repository_url: String::from("https://github.com/acme/widgets.git"),
            branch: Some(String::from("develop")),
            model: None,
        }
    );
}

/// **VALUE**: Identifier-bound commands cannot run without an id.
///
/// **BUG THIS CATCHES**: A missing `--composer-id` reaching the client as an
/// empty string and turning into a remote call.
#[test]
fn given_missing_composer_id_when_parsing_identifier_commands_then_rejected() {
    for command in ["details", "diff", "hash", "pause", "attach", "attach-logs", "open-pr"] {
        assert!(parse(&[command]).is_err(), "{command} accepted no id");
    }
    assert!(parse(&["revert", "--composer-id", "bc-1"]).is_err());
}

#[test]
fn given_revert_when_parsing_then_id_and_file_are_captured() {
    let cli = parse(&["revert", "--composer-id", "bc-1", "--file", "src/lib.rs"]).unwrap();

    assert_eq!(
        cli.command,
        Command::Revert {
            target: ComposerIdArg {
                composer_id: String::from("bc-1")
            },
            file: String::from("src/lib.rs"),
        }
    );
}

#[test]
fn given_open_pr_data_when_parsing_then_json_object_is_decoded() {
    let cli = parse(&["open-pr", "--composer-id", "bc-1", "--data", r#"{"title":"Fix"}"#]).unwrap();

    let Command::OpenPr { data, .. } = cli.command else {
        panic!("expected open-pr");
    };
    assert_eq!(
        serde_json::Value::Object(data.unwrap()),
        json!({"title": "Fix"})
    );
}

#[test]
fn given_non_object_data_when_parsing_then_rejected() {
    assert!(parse(&["attach", "--composer-id", "bc-1", "--data", "[1,2]"]).is_err());
}

#[test]
fn given_unknown_format_when_parsing_then_rejected() {
    assert!(parse(&["list", "--format", "yaml"]).is_err());
}

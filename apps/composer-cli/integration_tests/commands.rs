use crate::helpers::client_for;

use composer_cli::cli::{Command, ComposerIdArg};
use composer_cli::commands::execute;
use composer_cli::error::CliError;
use composer_cli::output::OutputFormat;

use composer_core::endpoints;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_list_command_when_executed_then_table_uses_requested_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .and(body_json(json!({"n": 5, "include_status": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"bcId": "bc-1", "name": "Refactor", "status": "running", "description": "Split modules"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let text = execute(&Command::List { limit: 5 }, &client_for(&server), OutputFormat::Table)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        text,
        "Found 1 background composers\n1. Refactor - Status: running\n   Description: Split modules"
    );
}

#[tokio::test]
async fn given_empty_list_when_executed_as_json_then_summary_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let text = execute(&Command::List { limit: 100 }, &client_for(&server), OutputFormat::Json)
        .await
        .unwrap()
        .unwrap();

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"summary": "No background composers found", "details": []}));
}

#[tokio::test]
async fn given_privacy_command_when_executed_then_normalized_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::PRIVACY_MODE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"privacyMode": "SOMETHING_NEW"})))
        .mount(&server)
        .await;

    let text = execute(&Command::Privacy, &client_for(&server), OutputFormat::Table)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(text, "Privacy mode: SOMETHING_NEW");
}

#[tokio::test]
async fn given_revert_command_when_executed_then_body_carries_id_and_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::REVERT_FILE))
        .and(body_json(json!({"bcId": "bc-1", "filePath": "src/main.rs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::Revert {
        target: ComposerIdArg {
            composer_id: String::from("bc-1"),
        },
        file: String::from("src/main.rs"),
    };

    let text = execute(&command, &client_for(&server), OutputFormat::Raw)
        .await
        .unwrap()
        .unwrap();

    assert!(!text.contains('\n'));
}

#[tokio::test]
async fn given_create_command_with_bad_repository_when_executed_then_no_request_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let command = Command::Create {
        task_description: String::from("Add tests"),
        repository_url: String::from("not a url"),
        branch: None,
        model: None,
    };

    let error = execute(&command, &client_for(&server), OutputFormat::Table)
        .await
        .unwrap_err();

    assert!(matches!(error, CliError::Api { status_code: 0, .. }));
    assert!(error.user_message().starts_with("Invalid Arguments:"));
}

/// **VALUE**: Remote rejections reach the exit path with status and body intact.
///
/// **WHY THIS MATTERS**: `--verbose` prints the upstream body; losing it in
/// conversion would leave users guessing why a call failed.
#[tokio::test]
async fn given_remote_rejection_when_executed_then_api_error_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::GET_DIFF_DETAILS))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "unauthorized"})))
        .mount(&server)
        .await;

    let command = Command::Diff(ComposerIdArg {
        composer_id: String::from("bc-1"),
    });

    let error = execute(&command, &client_for(&server), OutputFormat::Table)
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "API Error (401): Request failed with status code 401");
    assert_eq!(error.response_body(), Some(&json!({"error": "unauthorized"})));
}

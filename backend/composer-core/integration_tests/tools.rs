use crate::helpers::{TEST_COMPOSER_ID, client_for};

use composer_core::ComposerToolBox;
use composer_core::endpoints;
use composer_core::error::tool::ToolError;
use composer_core::tools::resources::API_STATUS_URI;

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn toolbox_for(server: &MockServer) -> ComposerToolBox {
    ComposerToolBox::new(Arc::new(client_for(server)))
}

#[tokio::test]
async fn given_catalog_when_listing_tools_then_every_operation_is_exposed() {
    let server = MockServer::start().await;

    let tools = toolbox_for(&server).tools();

    assert_eq!(tools.len(), 14);
    let create = tools
        .iter()
        .find(|t| t.name == "create-background-composer")
        .unwrap();
    assert_eq!(create.description, "Create a new background composer task in Cursor");
}

/// **VALUE**: The list tool forwards its limit and renders the normalized view.
#[tokio::test]
async fn given_list_tool_when_called_then_normalized_text_with_requested_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .and(body_json(json!({"n": 10, "include_status": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"bcId": "bc-1", "name": "Refactor", "status": "running"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = toolbox_for(&server)
        .call("list-background-composers", json!({}))
        .await
        .unwrap();

    assert!(!output.is_error);
    assert_eq!(
        output.text,
        "Found 1 background composers\n1. Refactor - Status: running"
    );
}

#[tokio::test]
async fn given_create_tool_when_called_then_success_message_lists_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::CREATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let output = toolbox_for(&server)
        .call(
            "create-background-composer",
            json!({
                "taskDescription": "Add a changelog",
                "repositoryUrl": "https://github.com/acme/widgets.git"
            }),
        )
        .await
        .unwrap();

    assert!(!output.is_error);
    assert_eq!(
        output.text,
        format!(
            "Background composer created successfully!\n\n\
             Composer ID: {TEST_COMPOSER_ID}\n\
             Task: Add a changelog\n\
             Repository: https://github.com/acme/widgets.git\n\
             Branch: main\n\
             Model: claude-4-sonnet-thinking"
        )
    );
}

/// **VALUE**: Remote failures become error text, not protocol errors.
///
/// **WHY THIS MATTERS**: The calling agent reads tool text; a protocol error
/// would hide the status and message it needs to react.
#[tokio::test]
async fn given_remote_404_when_calling_tool_then_error_text_with_category() {
    let server = MockServer::start().await;

    let output = toolbox_for(&server)
        .call("get-composer-details", json!({"composerId": "bc-missing"}))
        .await
        .unwrap();

    assert!(output.is_error);
    assert_eq!(
        output.text,
        "Failed to get composer details: API Error (404): Request failed with status code 404"
    );
}

#[tokio::test]
async fn given_blank_id_when_calling_tool_then_invalid_arguments_text() {
    let server = MockServer::start().await;

    let output = toolbox_for(&server)
        .call("pause-composer", json!({"composerId": ""}))
        .await
        .unwrap();

    assert!(output.is_error);
    assert_eq!(
        output.text,
        "Failed to pause composer: Invalid Arguments: Composer ID is required"
    );
}

#[tokio::test]
async fn given_details_tool_when_called_then_pretty_json_under_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::GET_DETAILED))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bcId": "bc-1"})))
        .mount(&server)
        .await;

    let output = toolbox_for(&server)
        .call("get-composer-details", json!({"composerId": "bc-1"}))
        .await
        .unwrap();

    let (header, body) = output.text.split_once("\n\n").unwrap();
    assert_eq!(header, "Composer Details:");
    let parsed: Value = serde_json::from_str(body).unwrap();
    assert_eq!(parsed["bcId"], "bc-1");
}

#[tokio::test]
async fn given_unknown_tool_when_calling_then_protocol_error() {
    let server = MockServer::start().await;

    let error = toolbox_for(&server)
        .call("drop-database", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(error, ToolError::UnknownTool { .. }));
}

#[tokio::test]
async fn given_status_resource_when_reading_then_endpoint_report_as_json() {
    let server = MockServer::start().await;

    let toolbox = toolbox_for(&server);
    let contents = toolbox.read_resource(API_STATUS_URI).await.unwrap();

    assert_eq!(contents.mime_type, "application/json");
    let report: Value = serde_json::from_str(&contents.text).unwrap();
    assert_eq!(report.as_array().unwrap().len(), 14);

    let error = toolbox.read_resource("cursor://nope").await.unwrap_err();
    assert!(matches!(error, ToolError::UnknownResource { .. }));
}

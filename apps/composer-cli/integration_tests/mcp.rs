use crate::helpers::{exchange, server_for};

use composer_cli::mcp::rpc::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use composer_cli::mcp::{PROTOCOL_VERSION, SERVER_NAME};

use composer_core::endpoints;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(id: u64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

#[tokio::test]
async fn given_initialize_when_served_then_protocol_and_server_info() {
    let remote = MockServer::start().await;

    let responses = exchange(&server_for(&remote), &[request(1, "initialize", json!({}))]).await;

    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
    assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

/// **VALUE**: Notifications and client responses never produce output.
///
/// **WHY THIS MATTERS**: Clients send `notifications/initialized` right after
/// the handshake; answering it would desynchronize their request ids.
#[tokio::test]
async fn given_notification_between_requests_when_served_then_only_requests_answered() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[
            request(1, "ping", Value::Null),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 99, "result": {}}),
            request(2, "ping", Value::Null),
        ],
    )
    .await;

    let ids: Vec<&Value> = responses.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, [&json!(1), &json!(2)]);
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn given_tools_list_when_served_then_full_catalog_with_schemas() {
    let remote = MockServer::start().await;

    let responses = exchange(&server_for(&remote), &[request(1, "tools/list", json!({}))]).await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 14);
    assert!(tools.iter().all(|tool| tool["inputSchema"].is_object()));
}

#[tokio::test]
async fn given_tools_call_when_remote_succeeds_then_text_content() {
    let remote = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::CHECK_WEB_ACCESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hasAccess": true})))
        .expect(1)
        .mount(&remote)
        .await;

    let responses = exchange(
        &server_for(&remote),
        &[request(
            3,
            "tools/call",
            json!({"name": "check-web-access", "arguments": null}),
        )],
    )
    .await;

    let result = &responses[0]["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Web access: Enabled");
}

/// **VALUE**: A remote failure is a successful RPC carrying error text.
#[tokio::test]
async fn given_tools_call_when_remote_fails_then_is_error_flag_set() {
    let remote = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::PAUSE))
        .respond_with(ResponseTemplate::new(403))
        .mount(&remote)
        .await;

    let responses = exchange(
        &server_for(&remote),
        &[request(
            4,
            "tools/call",
            json!({"name": "pause-composer", "arguments": {"composerId": "bc-1"}}),
        )],
    )
    .await;

    assert!(responses[0].get("error").is_none());
    let result = &responses[0]["result"];
    assert_eq!(result["isError"], true);
    assert_eq!(
        result["content"][0]["text"],
        "Failed to pause composer: API Error (403): Request failed with status code 403"
    );
}

#[tokio::test]
async fn given_unknown_tool_when_called_then_invalid_params_error() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[request(5, "tools/call", json!({"name": "delete-everything"}))],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], INVALID_PARAMS);
    assert_eq!(responses[0]["error"]["message"], "Unknown tool: delete-everything");
}

#[tokio::test]
async fn given_non_object_arguments_when_calling_tool_then_invalid_params_error() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[request(6, "tools/call", json!({"name": "get-privacy-mode", "arguments": [1]}))],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], INVALID_PARAMS);
}

#[tokio::test]
async fn given_prompts_get_when_served_then_rendered_user_message() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[request(
            7,
            "prompts/get",
            json!({
                "name": "create-composer-template",
                "arguments": {"taskType": "bug-fix", "description": "login fails", "priority": "high"}
            }),
        )],
    )
    .await;

    let message = &responses[0]["result"]["messages"][0];
    assert_eq!(message["role"], "user");
    let text = message["content"]["text"].as_str().unwrap();
    assert!(text.ends_with("login fails\n\nPriority: HIGH"), "{text}");
}

#[tokio::test]
async fn given_resources_list_when_served_then_status_resource_listed() {
    let remote = MockServer::start().await;

    let responses = exchange(&server_for(&remote), &[request(8, "resources/list", json!({}))]).await;

    let resources = responses[0]["result"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["uri"], "cursor://api/status");
}

#[tokio::test]
async fn given_unknown_resource_when_read_then_invalid_params_error() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[request(9, "resources/read", json!({"uri": "cursor://nope"}))],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], INVALID_PARAMS);
}

#[tokio::test]
async fn given_unknown_method_when_served_then_method_not_found() {
    let remote = MockServer::start().await;

    let responses = exchange(&server_for(&remote), &[request(10, "tools/delete", json!({}))]).await;

    assert_eq!(responses[0]["error"]["code"], METHOD_NOT_FOUND);
    assert_eq!(responses[0]["error"]["message"], "Method not found: tools/delete");
}

/// **VALUE**: Garbage on the wire yields a parse error and the loop keeps going.
///
/// **BUG THIS CATCHES**: One malformed line terminating the whole session.
#[tokio::test]
async fn given_malformed_line_when_served_then_parse_error_and_next_request_answered() {
    let remote = MockServer::start().await;
    let server = server_for(&remote);
    let mut output = Vec::new();

    let input = format!("{{not json\n\n{}\n", request(11, "ping", Value::Null));
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 11);
}

#[tokio::test]
async fn given_wrong_version_or_empty_batch_when_served_then_invalid_request() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[
            json!({"jsonrpc": "1.0", "id": 12, "method": "ping"}),
            json!([]),
        ],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], INVALID_REQUEST);
    assert_eq!(responses[0]["id"], 12);
    assert_eq!(responses[1]["error"]["code"], INVALID_REQUEST);
}

#[tokio::test]
async fn given_batch_when_served_then_one_response_per_request() {
    let remote = MockServer::start().await;

    let responses = exchange(
        &server_for(&remote),
        &[json!([
            request(13, "ping", Value::Null),
            {"jsonrpc": "2.0", "method": "notifications/initialized"},
            request(14, "prompts/list", Value::Null)
        ])],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[1]["result"]["prompts"][0]["name"], "create-composer-template");
}

use crate::mcp::rpc::{
    INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR, RpcError, error_response, success_response,
};

use composer_core::error::ToolError;

use serde_json::{Value, json};

#[test]
fn given_result_when_building_success_response_then_envelope_echoes_id() {
    let response = success_response(json!(7), json!({"ok": true}));

    assert_eq!(response, json!({"jsonrpc": "2.0", "id": 7, "result": {"ok": true}}));
}

#[test]
fn given_error_without_data_when_building_response_then_data_is_omitted() {
    let response = error_response(json!("a"), RpcError::method_not_found("tools/delete"));

    assert_eq!(
        response,
        json!({
            "jsonrpc": "2.0",
            "id": "a",
            "error": {"code": METHOD_NOT_FOUND, "message": "Method not found: tools/delete"}
        })
    );
}

#[test]
fn given_error_with_data_when_building_response_then_data_is_included() {
    let mut error = RpcError::parse_error("Parse error");
    error.data = Some(json!({"line": 1}));

    let response = error_response(Value::Null, error);

    assert_eq!(response["error"]["code"], PARSE_ERROR);
    assert_eq!(response["error"]["data"], json!({"line": 1}));
}

#[test]
fn given_tool_error_when_converting_then_invalid_params() {
    let error = RpcError::from(ToolError::unknown_prompt("missing-template"));

    assert_eq!(error.code, INVALID_PARAMS);
    assert!(error.message.contains("missing-template"));
}

//! Tool-protocol server: newline-delimited JSON-RPC 2.0 over a byte stream.
//!
//! One JSON value per line in, one per line out. Requests are answered in
//! order; notifications and client responses produce no output.

pub mod rpc;

use crate::error::CliError;

use composer_core::ComposerToolBox;

use rpc::{RpcError, error_response, success_response};

use log::{debug, info, warn};
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const SERVER_NAME: &str = "cursor-background-agent-mcp";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    toolbox: ComposerToolBox,
}

impl McpServer {
    pub fn new(toolbox: ComposerToolBox) -> Self {
        Self { toolbox }
    }

    /// Serve until `reader` reaches end of input.
    ///
    /// # Errors
    ///
    /// [`CliError::Io`] when reading a line or writing a response fails.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Tool server {SERVER_NAME} listening on stdio");
        let mut lines = reader.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| CliError::io(format!("Failed to read request: {e}")))?
        {
            if line.trim().is_empty() {
                continue;
            }

            for response in self.handle_line(&line).await {
                let mut text = response.to_string();
                text.push('\n');
                writer
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|e| CliError::io(format!("Failed to write response: {e}")))?;
            }
            writer
                .flush()
                .await
                .map_err(|e| CliError::io(format!("Failed to write response: {e}")))?;
        }

        info!("Tool server input closed");
        Ok(())
    }

    /// Answer one line of input. Malformed JSON yields a parse error with a null id.
    pub async fn handle_line(&self, line: &str) -> Vec<Value> {
        match serde_json::from_str::<Value>(line) {
            Ok(incoming) => self.handle_incoming_message(incoming).await,
            Err(e) => {
                warn!("Discarding malformed request: {e}");
                vec![error_response(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {e}")),
                )]
            }
        }
    }

    pub async fn handle_incoming_message(&self, incoming: Value) -> Vec<Value> {
        let mut responses = Vec::new();

        if let Some(batch) = incoming.as_array() {
            if batch.is_empty() {
                responses.push(error_response(
                    Value::Null,
                    RpcError::invalid_request("Batch request must not be empty"),
                ));
                return responses;
            }
            for item in batch {
                if let Some(response) = self.handle_single_message(item.clone()).await {
                    responses.push(response);
                }
            }
            return responses;
        }

        if let Some(response) = self.handle_single_message(incoming).await {
            responses.push(response);
        }
        responses
    }

    async fn handle_single_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some(rpc::JSONRPC_VERSION) {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        // Without a method this is a client response; nothing to answer.
        let method = obj.get("method").and_then(Value::as_str)?;

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        let Some(id) = obj.get("id").cloned() else {
            debug!("Ignoring notification {method}");
            return None;
        };

        debug!("Handling {method}");
        Some(match self.handle_request(method, params).await {
            Ok(payload) => success_response(id, payload),
            Err(err) => error_response(id, err),
        })
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.toolbox.tools() })),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => Ok(json!({ "resources": self.toolbox.resources() })),
            "resources/read" => self.handle_resources_read(params).await,
            "prompts/list" => Ok(json!({ "prompts": self.toolbox.prompts() })),
            "prompts/get" => self.handle_prompts_get(params),
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let arguments = object_argument(params, "tools/call")?;

        let output = self.toolbox.call(name, Value::Object(arguments)).await?;

        Ok(json!({
            "content": [{ "type": "text", "text": output.text }],
            "isError": output.is_error
        }))
    }

    async fn handle_resources_read(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("resources/read params must be an object"))?;

        let uri = params.get("uri").and_then(Value::as_str).ok_or_else(|| {
            RpcError::invalid_params("resources/read requires string field 'uri'")
        })?;

        let contents = self.toolbox.read_resource(uri).await?;
        let contents =
            serde_json::to_value(contents).map_err(|e| RpcError::internal(e.to_string()))?;

        Ok(json!({ "contents": [contents] }))
    }

    fn handle_prompts_get(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("prompts/get params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("prompts/get requires string field 'name'"))?;

        let arguments = object_argument(params, "prompts/get")?;
        let message = self.toolbox.get_prompt(name, Value::Object(arguments))?;

        Ok(json!({
            "description": format!("Prompt {name}"),
            "messages": [{
                "role": message.role,
                "content": { "type": "text", "text": message.text }
            }]
        }))
    }
}

fn object_argument(params: &Map<String, Value>, method: &str) -> Result<Map<String, Value>, RpcError> {
    match params.get("arguments") {
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(Value::Null) | None => Ok(Map::new()),
        Some(_) => Err(RpcError::invalid_params(format!(
            "{method} 'arguments' must be an object"
        ))),
    }
}

fn initialize_payload() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false },
            "prompts": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": "Manage Cursor background composers: create tasks, inspect their progress and diffs, open pull requests and adjust agent settings."
    })
}

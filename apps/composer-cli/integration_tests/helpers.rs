//! Shared setup for tests that run the binary's layers against `wiremock`.

use composer_cli::mcp::McpServer;

use composer_core::{BackgroundComposerClient, ClientConfig, ComposerToolBox};

use common::SessionToken;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "user_01CLITOKEN%3A%3Asecret";

pub fn client_for(server: &MockServer) -> Arc<BackgroundComposerClient> {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
        .with_retry_delay(Duration::from_millis(10));
    let token = SessionToken::new(TEST_TOKEN).expect("test token is not empty");

    Arc::new(BackgroundComposerClient::new(token, &config).expect("client builds"))
}

pub fn server_for(server: &MockServer) -> McpServer {
    McpServer::new(ComposerToolBox::new(client_for(server)))
}

/// Feed newline-delimited requests through `serve` and collect every response line.
pub async fn exchange(server: &McpServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|request| format!("{request}\n"))
        .collect();
    let mut output = Vec::new();

    server
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("serve completes");

    String::from_utf8(output)
        .expect("responses are utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

//! Shared setup for tests that run against a `wiremock` server.

use composer_core::{BackgroundComposerClient, ClientConfig, IdGenerator, TransportExecutor};

use common::SessionToken;

use std::sync::Arc;
use std::time::Duration;

use wiremock::MockServer;

pub const TEST_TOKEN: &str = "user_01TESTTOKEN%3A%3Asecret";
pub const TEST_COMPOSER_ID: &str = "bc-test-fixed";

/// Short enough to keep retry tests fast, long enough to measure.
pub const TEST_RETRY_DELAY: Duration = Duration::from_millis(20);

pub struct FixedIds;

impl IdGenerator for FixedIds {
    fn next_id(&self) -> String {
        String::from(TEST_COMPOSER_ID)
    }
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5))
        .with_retry_delay(TEST_RETRY_DELAY)
}

pub fn test_token() -> SessionToken {
    SessionToken::new(TEST_TOKEN).expect("test token is not empty")
}

pub fn transport_for(server: &MockServer) -> TransportExecutor {
    TransportExecutor::new(&test_config(&server.uri()), &test_token())
        .expect("transport builds")
}

pub fn client_for(server: &MockServer) -> BackgroundComposerClient {
    BackgroundComposerClient::with_id_generator(
        test_token(),
        &test_config(&server.uri()),
        Arc::new(FixedIds),
    )
    .expect("client builds")
}

/// Paths of every request the server saw, in arrival order.
pub async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

use crate::helpers::{received_paths, transport_for};

use composer_core::ComposerApiError;
use composer_core::resolver::EndpointResolver;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CANDIDATES: [&str; 3] = ["/api/a", "/api/b", "/api/c"];

/// **VALUE**: 404s advance the walk in order; the first success wins.
///
/// **WHY THIS MATTERS**: Only one route is expected to be live. Trying them out
/// of order, or in parallel, can submit the same task twice.
///
/// **BUG THIS CATCHES**: Reordered candidates or a stop on the first 404.
#[tokio::test]
async fn given_a_and_b_404_and_c_success_when_resolving_then_c_result_after_calls_in_order() {
    let server = MockServer::start().await;
    for candidate in ["/api/a", "/api/b"] {
        Mock::given(method("POST"))
            .and(path(candidate))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"route": "c"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let value = EndpointResolver::new(&transport)
        .try_in_order(&CANDIDATES, &json!({"task": "x"}))
        .await
        .unwrap();

    assert_eq!(value, json!({"route": "c"}));
    assert_eq!(received_paths(&server).await, ["/api/a", "/api/b", "/api/c"]);
}

#[tokio::test]
async fn given_all_candidates_404_when_resolving_then_resolution_exhausted() {
    // Unmatched requests get a 404 from the mock server
    let server = MockServer::start().await;

    let transport = transport_for(&server);
    let error = EndpointResolver::new(&transport)
        .try_in_order(&CANDIDATES, &json!({}))
        .await
        .unwrap_err();

    match &error {
        ComposerApiError::ResolutionExhausted { candidates, .. } => {
            assert_eq!(candidates, &["/api/a", "/api/b", "/api/c"]);
        }
        other => panic!("Expected ResolutionExhausted, got {other:?}"),
    }
    assert_eq!(error.status_code(), 0);
    assert_eq!(received_paths(&server).await.len(), 3);
}

/// **VALUE**: A non-404 failure stops the walk and is returned as-is.
///
/// **BUG THIS CATCHES**: A validation error on the live route being swallowed
/// while later candidates are tried.
#[tokio::test]
async fn given_first_candidate_422_when_resolving_then_error_without_trying_others() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/a"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "bad repo"})))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let error = EndpointResolver::new(&transport)
        .try_in_order(&CANDIDATES, &json!({}))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 422);
    assert_eq!(received_paths(&server).await, ["/api/a"]);
}

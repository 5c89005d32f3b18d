use crate::helpers::{TEST_RETRY_DELAY, TEST_TOKEN, test_config, test_token, transport_for};

use composer_core::{ComposerApiError, RequestDescriptor, TransportExecutor};

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Two 503s then a 200 yields the success value after exactly three
/// attempts, with the linear waits in between.
///
/// **WHY THIS MATTERS**: This is the retry contract: transient server failures
/// are absorbed, and the waits grow as `1×base`, `2×base`.
///
/// **BUG THIS CATCHES**: Retrying too few times, sleeping zero, or returning the
/// last 503 instead of the eventual success.
#[tokio::test]
async fn given_two_503s_then_success_when_executing_then_three_attempts_with_linear_waits() {
    let server = MockServer::start().await;
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_clone = attempts.clone();
    Mock::given(method("POST"))
        .and(path("/api/flaky"))
        .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
            if attempts_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_json(json!({"ok": true}))
            }
        })
        .expect(3)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let started = Instant::now();

    let value = transport
        .execute(&RequestDescriptor::post("/api/flaky", json!({})))
        .await
        .expect("third attempt succeeds");

    assert_eq!(value, json!({"ok": true}));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(started.elapsed() >= TEST_RETRY_DELAY * 3);
}

/// **VALUE**: A 400 is terminal after one attempt.
///
/// **BUG THIS CATCHES**: Retrying client errors, which resends input the remote
/// already rejected.
#[tokio::test]
async fn given_400_when_executing_then_single_attempt_and_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid"})))
        .expect(1)
        .mount(&server)
        .await;

    let error = transport_for(&server)
        .execute(&RequestDescriptor::post("/api/bad", json!({})))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 400);
    assert_eq!(error.response_body(), Some(&json!({"error": "invalid"})));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_persistent_500_when_executing_then_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let error = transport_for(&server)
        .execute(&RequestDescriptor::get("/api/down"))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 500);
    assert_eq!(error.response_body(), Some(&Value::String("boom".to_string())));
}

/// **VALUE**: No response at all maps to status 0 after the full retry budget.
///
/// **WHY THIS MATTERS**: Callers tell "remote unreachable" from "remote rejected"
/// by the zero status.
#[tokio::test]
async fn given_unreachable_host_when_executing_then_transport_error_with_status_zero() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport =
        TransportExecutor::new(&test_config(&format!("http://{addr}")), &test_token()).unwrap();

    let error = transport
        .execute(&RequestDescriptor::get("/api/anything"))
        .await
        .unwrap_err();

    assert!(matches!(error, ComposerApiError::Transport { .. }));
    assert_eq!(error.status_code(), 0);
    assert!(error.message().starts_with("Request failed"));
}

/// **VALUE**: Every request carries the session cookie and JSON headers.
///
/// **BUG THIS CATCHES**: The credential missing from default headers, which the
/// remote reports as a confusing 401 on every call.
#[tokio::test]
async fn given_request_when_executing_then_session_cookie_and_json_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    transport_for(&server)
        .execute(&RequestDescriptor::get("/api/headers"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    let cookie = headers.get("cookie").unwrap().to_str().unwrap();

    assert_eq!(
        cookie,
        format!("NEXT_LOCALE=en; WorkosCursorSessionToken={TEST_TOKEN}")
    );
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    assert_eq!(headers.get("accept").unwrap().to_str().unwrap(), "application/json");
}

#[tokio::test]
async fn given_empty_success_body_when_executing_then_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let value = transport_for(&server)
        .execute(&RequestDescriptor::post("/api/empty", json!({})))
        .await
        .unwrap();

    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn given_non_json_success_body_when_executing_then_decode_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let error = transport_for(&server)
        .execute(&RequestDescriptor::get("/api/html"))
        .await
        .unwrap_err();

    assert!(matches!(error, ComposerApiError::Decode { .. }));
    assert_eq!(error.status_code(), 0);
}

/// **VALUE**: A base address with a path prefix keeps the prefix for every
/// endpoint, with or without a trailing slash.
///
/// **BUG THIS CATCHES**: Joining an absolute endpoint path onto the base,
/// which drops a reverse-proxy prefix and sends requests to the wrong route.
#[tokio::test]
async fn given_base_url_with_path_prefix_when_executing_then_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/proxy/api/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    for base in [format!("{}/proxy", server.uri()), format!("{}/proxy/", server.uri())] {
        let transport = TransportExecutor::new(&test_config(&base), &test_token()).unwrap();

        let value = transport
            .execute(&RequestDescriptor::post("/api/x", json!({})))
            .await
            .unwrap();

        assert_eq!(value, json!({"ok": true}));
    }
}

use crate::HttpStatusCode;

/// **VALUE**: Verifies the retry classification only accepts 5xx statuses.
///
/// **WHY THIS MATTERS**: The transport retries on `is_retryable()`. Retrying a 4xx
/// would hammer the remote with input it already rejected.
///
/// **BUG THIS CATCHES**: Would catch 429 or 404 sneaking into the retryable set.
#[test]
fn given_statuses_when_checking_retryable_then_only_server_errors_qualify() {
    assert!(HttpStatusCode(500).is_retryable());
    assert!(HttpStatusCode(503).is_retryable());
    assert!(HttpStatusCode(599).is_retryable());

    assert!(!HttpStatusCode(400).is_retryable());
    assert!(!HttpStatusCode(404).is_retryable());
    assert!(!HttpStatusCode(429).is_retryable());
    assert!(!HttpStatusCode(200).is_retryable());
}

#[test]
fn given_statuses_when_classifying_then_ranges_are_exclusive() {
    let not_found = HttpStatusCode::from(404);

    assert!(not_found.is_not_found());
    assert!(not_found.is_client_error());
    assert!(!not_found.is_server_error());
    assert!(!not_found.is_success());

    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(405).is_not_found());
    assert_eq!(HttpStatusCode(502).to_string(), "502");
}

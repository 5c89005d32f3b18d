use crate::client::probe::{ProbeResult, ProbeStatus};
use crate::error::composer_api::ComposerApiError;

use serde_json::json;

/// **VALUE**: Verifies the three-way classification of probe calls.
///
/// **WHY THIS MATTERS**: A 422 proves the route exists (our test input was
/// rejected); a 503 says the remote is unhealthy. Reporting both the same way
/// hides outages.
///
/// **BUG THIS CATCHES**: 503 slipping into the accessible set, or a 2xx being
/// misreported.
#[test]
fn given_422_503_and_200_when_classifying_then_accessible_error_and_success() {
    let rejected: Result<(), ComposerApiError> = Err(ComposerApiError::remote(422, None));
    let unhealthy: Result<(), ComposerApiError> = Err(ComposerApiError::remote(503, None));
    let ok: Result<(), ComposerApiError> = Ok(());

    let rejected = ProbeResult::classify("Pause Composer", &rejected);
    let unhealthy = ProbeResult::classify("Pause Composer", &unhealthy);
    let ok = ProbeResult::classify("Pause Composer", &ok);

    assert_eq!(rejected.status, ProbeStatus::Accessible);
    assert_eq!(rejected.status_code, Some(422));
    assert_eq!(unhealthy.status, ProbeStatus::Error);
    assert_eq!(unhealthy.status_code, Some(503));
    assert_eq!(ok.status, ProbeStatus::Success);
    assert!(ok.error.is_none());
}

#[test]
fn given_each_accessible_status_when_classifying_then_accessible() {
    for status in [400, 404, 405, 422, 500] {
        let outcome: Result<(), ComposerApiError> = Err(ComposerApiError::remote(status, None));

        assert_eq!(
            ProbeResult::classify("x", &outcome).status,
            ProbeStatus::Accessible,
            "status {status}"
        );
    }
}

#[test]
fn given_no_response_when_classifying_then_error_without_status() {
    let outcome: Result<(), ComposerApiError> =
        Err(ComposerApiError::resolution_exhausted(&["/a"]));

    let result = ProbeResult::classify("Create Composer", &outcome);

    assert_eq!(result.status, ProbeStatus::Error);
    assert_eq!(result.status_code, None);
    assert!(result.error.unwrap().starts_with("Endpoint Resolution Error"));
}

#[test]
fn given_result_when_serializing_then_lowercase_status_and_absent_fields_skipped() {
    let ok: Result<(), ComposerApiError> = Ok(());

    let value = serde_json::to_value(ProbeResult::classify("Get Privacy Mode", &ok)).unwrap();

    assert_eq!(value, json!({"endpoint": "Get Privacy Mode", "status": "success"}));
}

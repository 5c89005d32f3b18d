use crate::error::composer_api::ComposerApiError;
use crate::resolver::CandidateOutcome;

use serde_json::json;

#[test]
fn given_404_when_tagging_outcome_then_not_found() {
    let outcome = CandidateOutcome::from(Err(ComposerApiError::remote(404, None)));

    assert!(matches!(outcome, CandidateOutcome::NotFound));
}

/// **VALUE**: Only 404 advances the walk; other failures are terminal.
///
/// **BUG THIS CATCHES**: Treating 405 or 500 as "try next", which would send the
/// same create request to several routes.
#[test]
fn given_other_failures_when_tagging_outcome_then_failed() {
    for status in [400, 405, 500] {
        let outcome = CandidateOutcome::from(Err(ComposerApiError::remote(status, None)));

        assert!(matches!(outcome, CandidateOutcome::Failed(_)), "status {status}");
    }
}

#[test]
fn given_success_when_tagging_outcome_then_value_is_kept() {
    let outcome = CandidateOutcome::from(Ok(json!({"ok": true})));

    match outcome {
        CandidateOutcome::Success(value) => assert_eq!(value, json!({"ok": true})),
        other => panic!("Expected Success, got {other:?}"),
    }
}

use crate::helpers::{TEST_COMPOSER_ID, client_for, received_paths};

use composer_core::ComposerApiError;
use composer_core::endpoints;

use models::{CreateComposerOptionsBuilder, UserSettings};

use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_list_when_called_then_posts_defaults_and_decodes_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .and(body_json(json!({"n": 100, "include_status": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"bcId": "bc-1", "name": "First", "status": "running", "createdAtMs": 1700000000000_i64}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server).list_composers().await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.first_id(), Some("bc-1"));
    assert_eq!(list.as_slice()[0].created_at_ms, Some(1_700_000_000_000));
}

#[tokio::test]
async fn given_detailed_when_called_then_body_requests_diff_and_team_wide() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::GET_DETAILED))
        .and(body_json(json!({
            "bcId": "bc-42",
            "n": 1,
            "includeDiff": true,
            "includeTeamWide": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bcId": "bc-42",
            "name": "Detail",
            "teamWide": false,
            "diff": {"files": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detailed = client_for(&server).get_detailed_composer("bc-42").await.unwrap();

    assert_eq!(detailed.composer.bc_id.as_deref(), Some("bc-42"));
    assert_eq!(detailed.team_wide, Some(false));
    assert_eq!(detailed.diff, Some(json!({"files": 2})));
}

#[tokio::test]
async fn given_revert_file_when_called_then_body_has_id_and_file_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::REVERT_FILE))
        .and(body_json(json!({"bcId": "bc-7", "filePath": "src/main.rs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .revert_file("bc-7", "src/main.rs")
        .await
        .unwrap();

    assert_eq!(response.success, Some(true));
}

/// **VALUE**: The caller's id wins over a conflicting key in the extra data.
///
/// **BUG THIS CATCHES**: Opening a pull request for a different composer than
/// the one named by the caller.
#[tokio::test]
async fn given_open_pr_with_extra_data_when_called_then_bc_id_is_authoritative() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::OPEN_PR))
        .and(body_json(json!({"bcId": "bc-real", "title": "Fix"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "prUrl": "https://example.test/pr/1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut extra = Map::new();
    extra.insert("bcId".to_string(), json!("bc-other"));
    extra.insert("title".to_string(), json!("Fix"));

    let response = client_for(&server).open_pr("bc-real", extra).await.unwrap();

    assert_eq!(response.pr_url.as_deref(), Some("https://example.test/pr/1"));
}

/// **VALUE**: Missing identifiers fail before any request is sent.
///
/// **WHY THIS MATTERS**: The remote would answer with an opaque 400; worse, a
/// defaulted id could act on somebody else's composer.
#[tokio::test]
async fn given_blank_composer_id_when_calling_id_operations_then_precondition_and_no_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let errors = [
        client.pause_composer("").await.unwrap_err(),
        client.get_diff_details("  ").await.unwrap_err(),
        client.revert_file("bc-1", "").await.unwrap_err(),
        client.attach_composer_logs("").await.unwrap_err(),
    ];

    for error in &errors {
        assert!(matches!(error, ComposerApiError::Precondition { .. }), "{error}");
        assert_eq!(error.status_code(), 0);
    }
    assert!(received_paths(&server).await.is_empty());
}

/// **VALUE**: Create falls back across candidate routes and returns the
/// generated id when the remote does not report one.
#[tokio::test]
async fn given_primary_create_route_missing_when_creating_then_falls_back_and_returns_generated_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::CREATE_CANDIDATES[1]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let options = CreateComposerOptionsBuilder::default()
        .with_task_description("Add CI")
        .with_repository_url("https://github.com/acme/widgets.git")
        .build()
        .unwrap();

    let submission = client_for(&server).create_composer(&options).await.unwrap();

    assert_eq!(submission.composer_id(), TEST_COMPOSER_ID);
    assert_eq!(
        received_paths(&server).await,
        [endpoints::CREATE_CANDIDATES[0], endpoints::CREATE_CANDIDATES[1]]
    );

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[1].body_json().unwrap();
    assert_eq!(body["bcId"], TEST_COMPOSER_ID);
    assert_eq!(body["snapshotNameOrId"], "github.com/acme/widgets");
}

#[tokio::test]
async fn given_create_response_with_id_when_creating_then_remote_id_wins() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::CREATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "composer": {"bcId": "bc-from-remote", "workspaceRootPath": "/workspace"},
            "wasSwappedToDefault": false
        })))
        .mount(&server)
        .await;

    let options = CreateComposerOptionsBuilder::default()
        .with_task_description("Add CI")
        .with_repository_url("https://github.com/acme/widgets")
        .build()
        .unwrap();

    let submission = client_for(&server).create_composer(&options).await.unwrap();

    assert_eq!(submission.requested_id, TEST_COMPOSER_ID);
    assert_eq!(submission.composer_id(), "bc-from-remote");
    assert_eq!(submission.response.was_swapped_to_default, Some(false));
}

#[tokio::test]
async fn given_settings_endpoints_when_called_then_get_and_post_are_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoints::USER_SETTINGS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"allowWebAccess": true})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(endpoints::UPDATE_USER_SETTINGS))
        .and(body_json(json!({"allowWebAccess": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"allowWebAccess": false})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let current = client.get_user_settings().await.unwrap();
    let updated = client
        .update_user_settings(&UserSettings::default().with_flag("allowWebAccess", false))
        .await
        .unwrap();

    assert_eq!(current.flag("allowWebAccess"), Some(true));
    assert_eq!(updated.flag("allowWebAccess"), Some(false));
}

#[tokio::test]
async fn given_parsed_operations_when_called_then_normalized_summaries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::CHECK_WEB_ACCESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hasAccess": true})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(endpoints::PRIVACY_MODE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"privacyMode": "PRIVACY_MODE_NO_TRAINING"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert_eq!(
        client.check_web_access_parsed().await.unwrap().summary(),
        "Web access: Enabled"
    );
    assert_eq!(
        client.get_privacy_mode_parsed().await.unwrap().summary(),
        "Privacy mode: Data not used for training"
    );
    assert_eq!(
        client.list_composers_parsed().await.unwrap().summary(),
        "No background composers found"
    );
}

/// **VALUE**: A detailed record whose timestamp arrives as a string still decodes.
///
/// **BUG THIS CATCHES**: A field type change on the remote turning every
/// details call into a decode error.
#[tokio::test]
async fn given_string_timestamp_when_getting_detailed_then_decodes_with_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::GET_DETAILED))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bcId": "bc-1",
            "name": "Fix bug",
            "createdAtMs": "1700000000000",
            "teamWide": "sometimes"
        })))
        .mount(&server)
        .await;

    let detailed = client_for(&server).get_detailed_composer("bc-1").await.unwrap();

    assert_eq!(detailed.composer.name.as_deref(), Some("Fix bug"));
    assert_eq!(detailed.composer.created_at_ms, Some(1_700_000_000_000));
    assert_eq!(detailed.team_wide, None);
}

#[tokio::test]
async fn given_float_timestamp_in_list_when_parsed_then_name_and_status_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"bcId": "bc-1", "name": "Fix bug", "status": "running", "createdAtMs": 1700000000000.0}
        ])))
        .mount(&server)
        .await;

    let parsed = client_for(&server).list_composers_parsed().await.unwrap();

    assert_eq!(parsed.summary(), "Found 1 background composers");
    assert_eq!(parsed.details(), ["1. Fix bug - Status: running"]);
}

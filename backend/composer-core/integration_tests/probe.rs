use crate::helpers::{TEST_COMPOSER_ID, client_for};

use composer_core::client::probe::PLACEHOLDER_COMPOSER_ID;
use composer_core::endpoints;
use composer_core::{ProbeResult, ProbeStatus};

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BATTERY: [&str; 14] = [
    "Check Web Access",
    "Get User Settings",
    "Update User Settings",
    "Get Privacy Mode",
    "Create Composer",
    "List Composers",
    "Get Detailed Composer",
    "Get Diff Details",
    "Get Changes Hash",
    "Open Pull Request",
    "Pause Composer",
    "Revert File",
    "Attach Composer",
    "Attach Composer Logs",
];

fn names(results: &[ProbeResult]) -> Vec<&str> {
    results.iter().map(|r| r.endpoint.as_str()).collect()
}

/// Body of the first request the server saw on `route`.
async fn body_sent_to(server: &MockServer, route: &str) -> Value {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .find(|r| r.url.path() == route)
        .and_then(|r| r.body_json().ok())
        .unwrap_or(Value::Null)
}

/// **VALUE**: The probe walks every operation in its fixed order and never stops
/// on a failure.
///
/// **WHY THIS MATTERS**: The probe's job is a complete reachability report. An
/// early abort hides which later routes are broken.
///
/// **BUG THIS CATCHES**: A `?` inside the battery, or a reordered phase.
#[tokio::test]
async fn given_every_route_rejecting_input_when_probing_then_full_battery_is_accessible() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let results = client_for(&server).test_all_endpoints().await;

    assert_eq!(names(&results), BATTERY);
    for result in &results {
        assert_eq!(result.status, ProbeStatus::Accessible, "{}", result.endpoint);
        assert_eq!(result.status_code, Some(422));
    }
}

/// **VALUE**: Without an id from create or list, the placeholder id is used.
#[tokio::test]
async fn given_no_composer_available_when_probing_then_placeholder_id_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    client_for(&server).test_all_endpoints().await;

    assert_eq!(
        body_sent_to(&server, endpoints::PAUSE).await,
        json!({"bcId": PLACEHOLDER_COMPOSER_ID})
    );
}

/// **VALUE**: A successful create hands its id to the identifier-bound phase.
#[tokio::test]
async fn given_create_succeeds_when_probing_then_its_id_drives_later_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::CREATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"bcId": "bc-listed"}])),
        )
        .mount(&server)
        .await;

    let results = client_for(&server).test_all_endpoints().await;

    let create = results.iter().find(|r| r.endpoint == "Create Composer").unwrap();
    assert_eq!(create.status, ProbeStatus::Success);

    let detail_body = body_sent_to(&server, endpoints::GET_DETAILED).await;
    assert_eq!(detail_body["bcId"], TEST_COMPOSER_ID);
}

/// **VALUE**: Without a created id, the first listed composer is the subject.
#[tokio::test]
async fn given_create_fails_and_list_has_items_when_probing_then_first_listed_id_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"bcId": "bc-listed", "name": "Existing"},
            {"bcId": "bc-second"}
        ])))
        .mount(&server)
        .await;

    let results = client_for(&server).test_all_endpoints().await;

    // Every create candidate is unmatched, so the resolver exhausts
    let create = results.iter().find(|r| r.endpoint == "Create Composer").unwrap();
    assert_eq!(create.status, ProbeStatus::Error);
    assert_eq!(create.status_code, None);

    let hash_body = body_sent_to(&server, endpoints::GET_CHANGES_HASH).await;
    assert_eq!(hash_body["bcId"], "bc-listed");
}

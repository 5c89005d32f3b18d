use crate::payload::{
    IdGenerator, UuidIdGenerator, build_composer_payload, strip_git_suffix, strip_protocol,
};

use models::CreateComposerOptionsBuilder;

use serde_json::Value;

struct FixedIds;

impl IdGenerator for FixedIds {
    fn next_id(&self) -> String {
        String::from("bc-fixed")
    }
}

/// **VALUE**: Verifies the URL transformation the remote expects.
///
/// **WHY THIS MATTERS**: The snapshot/repo fields take a protocol-less,
/// suffix-less identifier while the devcontainer keeps the protocol. Mixing
/// them up creates a composer pointing nowhere.
///
/// **BUG THIS CATCHES**: Stripping the protocol from the devcontainer URL or
/// keeping `.git` anywhere.
#[test]
fn given_git_url_without_branch_when_building_payload_then_urls_and_branch_are_derived() {
    let options = CreateComposerOptionsBuilder::default()
        .with_task_description("Add a README")
        .with_repository_url("https://github.com/acme/widgets.git")
        .build()
        .unwrap();

    let payload = build_composer_payload(&options, &FixedIds);

    assert_eq!(payload.snapshot_name_or_id, "github.com/acme/widgets");
    assert_eq!(payload.repo_url, "github.com/acme/widgets");
    assert_eq!(
        payload.devcontainer_starting_point.url,
        "https://github.com/acme/widgets"
    );
    assert_eq!(payload.devcontainer_starting_point.git_ref, "main");
    assert_eq!(payload.model_details.model_name, "claude-4-sonnet-thinking");
    assert_eq!(payload.bc_id, "bc-fixed");
}

/// **VALUE**: Verifies the serialized wire names and fixed values.
///
/// **BUG THIS CATCHES**: A missing `rename` turning `ref` or `type` into the
/// Rust field name, or `richText` being sent as an object.
#[test]
fn given_payload_when_serializing_then_wire_shape_matches_remote_contract() {
    let options = CreateComposerOptionsBuilder::default()
        .with_task_description("Fix the flaky test")
        .with_repository_url("http://gitlab.com/team/app")
        .with_branch("develop")
        .with_model("custom-model")
        .build()
        .unwrap();

    let value = serde_json::to_value(build_composer_payload(&options, &FixedIds)).unwrap();

    assert_eq!(value["snapshotNameOrId"], "gitlab.com/team/app");
    assert_eq!(value["devcontainerStartingPoint"]["url"], "http://gitlab.com/team/app");
    assert_eq!(value["devcontainerStartingPoint"]["ref"], "develop");
    assert_eq!(value["modelDetails"]["modelName"], "custom-model");
    assert_eq!(value["modelDetails"]["maxMode"], true);
    assert_eq!(value["repositoryInfo"], serde_json::json!({}));
    assert_eq!(value["snapshotWorkspaceRootPath"], "/workspace");
    assert_eq!(value["autoBranch"], true);
    assert_eq!(value["returnImmediately"], true);
    assert_eq!(value["source"], "BACKGROUND_COMPOSER_SOURCE_WEBSITE");
    assert_eq!(value["bcId"], "bc-fixed");
    assert_eq!(value["addInitialMessageToResponses"], true);

    let message = &value["conversationHistory"][0];
    assert_eq!(message["text"], "Fix the flaky test");
    assert_eq!(message["type"], "MESSAGE_TYPE_HUMAN");

    let rich_text = message["richText"].as_str().unwrap();
    let document: Value = serde_json::from_str(rich_text).unwrap();
    assert_eq!(document["root"]["type"], "root");
    assert_eq!(document["root"]["children"][0]["type"], "paragraph");
    assert_eq!(
        document["root"]["children"][0]["children"][0]["text"],
        "Fix the flaky test"
    );
}

#[test]
fn given_uuid_generator_when_generating_then_ids_are_prefixed_and_unique() {
    let generator = UuidIdGenerator;

    let first = generator.next_id();
    let second = generator.next_id();

    assert!(first.starts_with("bc-"));
    assert_eq!(first.len(), "bc-".len() + 36);
    assert_ne!(first, second);
}

#[test]
fn given_urls_when_stripping_then_protocol_and_suffix_are_removed() {
    assert_eq!(strip_protocol("https://github.com/a/b"), "github.com/a/b");
    assert_eq!(strip_protocol("http://github.com/a/b"), "github.com/a/b");
    assert_eq!(strip_protocol("github.com/a/b"), "github.com/a/b");

    assert_eq!(strip_git_suffix("https://github.com/a/b.git"), "https://github.com/a/b");
    assert_eq!(strip_git_suffix("https://github.com/a/b/"), "https://github.com/a/b");
    assert_eq!(strip_git_suffix("https://github.com/a/b"), "https://github.com/a/b");
}

use crate::{ComposerList, CreateComposerResponse, DetailedComposer};

use serde_json::json;

/// **VALUE**: Verifies that every non-list payload decodes to an empty list.
///
/// **WHY THIS MATTERS**: The list endpoint's shape is not under our control. A decode
/// failure here would turn "no composers" into an error for every consumer.
///
/// **BUG THIS CATCHES**: Would catch a switch back to a plain `Vec<BackgroundComposer>`
/// deserializer that rejects `null` or objects.
#[test]
fn given_non_list_payloads_when_decoding_composer_list_then_returns_empty() {
    for payload in [json!(null), json!("oops"), json!(42), json!({"error": "nope"})] {
        let list: ComposerList = serde_json::from_value(payload.clone()).unwrap();
        assert!(list.is_empty(), "payload {payload} should decode to empty list");
    }
}

#[test]
fn given_wrapped_composers_when_decoding_then_unwraps_array() {
    let payload = json!({
        "composers": [
            {"bcId": "bc-1", "name": "First", "status": "running", "createdAtMs": 1700000000000_i64},
            {"bcId": "bc-2", "status": "paused"}
        ]
    });

    let list: ComposerList = serde_json::from_value(payload).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.first_id(), Some("bc-1"));
    assert_eq!(list.as_slice()[0].created_at_ms, Some(1_700_000_000_000));
    assert_eq!(list.as_slice()[1].name, None);
}

#[test]
fn given_malformed_entry_when_decoding_then_keeps_count_with_empty_record() {
    let payload = json!([{"bcId": "bc-1"}, "not-an-object"]);

    let list = ComposerList::from_value(payload);

    assert_eq!(list.len(), 2);
    assert_eq!(list.as_slice()[1].bc_id, None);
}

#[test]
fn given_detailed_payload_when_decoding_then_flattens_record_fields() {
    let payload = json!({
        "bcId": "detailed-composer-123",
        "name": "Detailed Test Composer",
        "status": "running",
        "repoUrl": "github.com/test/detailed-repo",
        "diff": {"files": [{"path": "src/test.ts", "additions": 10, "deletions": 5}]},
        "teamWide": false
    });

    let detailed: DetailedComposer = serde_json::from_value(payload).unwrap();

    assert_eq!(detailed.composer.bc_id.as_deref(), Some("detailed-composer-123"));
    assert_eq!(detailed.composer.repo_url.as_deref(), Some("github.com/test/detailed-repo"));
    assert_eq!(detailed.team_wide, Some(false));
    assert!(detailed.diff.is_some());
}

#[test]
fn given_create_response_when_reading_composer_id_then_returns_bc_id() {
    let response: CreateComposerResponse = serde_json::from_value(json!({
        "composer": {"bcId": "new-composer-789", "workspaceRootPath": "/workspace"},
        "was_swapped_to_default": true
    }))
    .unwrap();

    assert_eq!(response.composer_id(), Some("new-composer-789"));
    assert_eq!(response.was_swapped_to_default, Some(true));
    assert_eq!(CreateComposerResponse::default().composer_id(), None);
}

/// **VALUE**: Fields of an unexpected type decode as missing instead of failing
/// the record.
///
/// **WHY THIS MATTERS**: The remote controls these shapes. A timestamp sent as a
/// float or string must not erase the name and status next to it.
///
/// **BUG THIS CATCHES**: All-or-nothing record decoding that turns one drifted
/// field into an "Unnamed - Status: Unknown" row.
#[test]
fn given_drifted_field_types_when_decoding_list_then_other_fields_survive() {
    let payload = json!([
        {"bcId": "bc-1", "name": "Fix bug", "status": "running", "createdAtMs": 1700000000000.0},
        {"bcId": "bc-2", "name": 42, "status": ["odd"], "updatedAtMs": "1700000000123"},
        {"bcId": "bc-3", "createdAtMs": {"seconds": 1}, "updatedAtMs": "soon"}
    ]);

    let list = ComposerList::from_value(payload);
    let items = list.as_slice();

    assert_eq!(items[0].name.as_deref(), Some("Fix bug"));
    assert_eq!(items[0].status.as_deref(), Some("running"));
    assert_eq!(items[0].created_at_ms, Some(1_700_000_000_000));
    assert_eq!(items[1].bc_id.as_deref(), Some("bc-2"));
    assert_eq!(items[1].name, None);
    assert_eq!(items[1].status, None);
    assert_eq!(items[1].updated_at_ms, Some(1_700_000_000_123));
    assert_eq!(items[2].created_at_ms, None);
    assert_eq!(items[2].updated_at_ms, None);
}

#[test]
fn given_string_timestamp_and_wrong_flag_when_decoding_detailed_then_ok() {
    let payload = json!({
        "bcId": "bc-1",
        "createdAtMs": "1700000000000",
        "teamWide": "yes",
        "diff": null
    });

    let detailed: DetailedComposer = serde_json::from_value(payload).unwrap();

    assert_eq!(detailed.composer.created_at_ms, Some(1_700_000_000_000));
    assert_eq!(detailed.team_wide, None);
}

#[test]
fn given_non_object_composer_when_decoding_create_response_then_id_is_absent() {
    let response: CreateComposerResponse =
        serde_json::from_value(json!({"composer": "bc-1", "wasSwappedToDefault": 1})).unwrap();

    assert_eq!(response.composer_id(), None);
    assert_eq!(response.was_swapped_to_default, None);
}

use crate::normalizer::{
    EMPTY_COMPOSER_LIST_SUMMARY, USER_SETTINGS_SUMMARY, normalize_composer_list,
    normalize_composer_list_value, normalize_privacy_mode, normalize_user_settings,
    normalize_web_access, privacy_mode_label, split_camel_case,
};

use models::{ComposerList, PrivacyModeResponse, UserSettings, WebAccessResponse};

use serde_json::{Value, json};

/// **VALUE**: Malformed or absent list input degrades to the empty state.
///
/// **WHY THIS MATTERS**: Normalizers sit between the remote and every printer;
/// a shape change on the remote must never crash the caller.
///
/// **BUG THIS CATCHES**: Treating `null` or an object as a one-item list.
#[test]
fn given_non_array_inputs_when_normalizing_list_then_empty_summary_and_no_details() {
    for input in [
        Value::Null,
        json!("composers"),
        json!(42),
        json!({"unexpected": true}),
        json!([]),
    ] {
        let normalized = normalize_composer_list_value(input);

        assert_eq!(normalized.summary(), EMPTY_COMPOSER_LIST_SUMMARY);
        assert!(normalized.details().is_empty());
    }
}

/// **VALUE**: Count in summary, one 1-based line per item.
///
/// **BUG THIS CATCHES**: Zero-based indices or dropped items.
#[test]
fn given_composers_when_normalizing_list_then_summary_has_count_and_lines_are_indexed() {
    let list = ComposerList::from_value(json!([
        {"bcId": "bc-1", "name": "Fix login", "status": "running", "description": "OAuth flow"},
        {"bcId": "bc-2"},
        {"bcId": "bc-3", "name": "Docs", "status": "completed"}
    ]));

    let normalized = normalize_composer_list(&list);

    assert_eq!(normalized.summary(), "Found 3 background composers");
    assert_eq!(normalized.details().len(), 3);
    for (index, line) in normalized.details().iter().enumerate() {
        assert!(line.starts_with(&format!("{}. ", index + 1)), "{line}");
    }
    assert_eq!(
        normalized.details()[0],
        "1. Fix login - Status: running\n   Description: OAuth flow"
    );
    assert_eq!(normalized.details()[1], "2. Unnamed - Status: Unknown");
    assert_eq!(normalized.details()[2], "3. Docs - Status: completed");
}

#[test]
fn given_wrapped_array_when_normalizing_list_then_entries_are_read() {
    let normalized = normalize_composer_list_value(json!({
        "composers": [{"name": "Only", "status": "paused"}]
    }));

    assert_eq!(normalized.summary(), "Found 1 background composers");
    assert_eq!(normalized.details(), ["1. Only - Status: paused".to_string()]);
}

#[test]
fn given_web_access_flag_when_normalizing_then_enabled_or_disabled() {
    let enabled = WebAccessResponse {
        has_access: Some(true),
    };
    let disabled = WebAccessResponse {
        has_access: Some(false),
    };

    assert_eq!(normalize_web_access(&enabled).summary(), "Web access: Enabled");
    assert_eq!(normalize_web_access(&disabled).summary(), "Web access: Disabled");
    assert_eq!(
        normalize_web_access(&WebAccessResponse::default()).summary(),
        "Web access: Disabled"
    );
    assert!(normalize_web_access(&enabled).details().is_empty());
}

/// **VALUE**: Every recognized privacy literal maps to its exact phrase.
///
/// **WHY THIS MATTERS**: The remote may add literals; unknown ones must be
/// echoed, not hidden behind a generic label.
///
/// **BUG THIS CATCHES**: A typo in a mapped literal silently falling through to raw output.
#[test]
fn given_privacy_literals_when_normalizing_then_known_map_and_unknown_echo() {
    let cases = [
        ("PRIVACY_MODE_NO_TRAINING", "Privacy mode: Data not used for training"),
        ("PRIVACY_MODE_TRAINING", "Privacy mode: Data used for training"),
        ("PRIVACY_MODE_FULL_PRIVACY", "Privacy mode: Full privacy mode"),
        ("PRIVACY_MODE_SOMETHING_NEW", "Privacy mode: PRIVACY_MODE_SOMETHING_NEW"),
    ];

    for (literal, expected) in cases {
        let response = PrivacyModeResponse {
            privacy_mode: Some(literal.to_string()),
        };
        let normalized = normalize_privacy_mode(&response);

        assert_eq!(normalized.summary(), expected);
        assert!(normalized.details().is_empty());
    }

    assert_eq!(privacy_mode_label("anything"), "anything");
}

#[test]
fn given_absent_privacy_mode_when_normalizing_then_unknown() {
    let normalized = normalize_privacy_mode(&PrivacyModeResponse::default());

    assert_eq!(normalized.summary(), "Privacy mode: Unknown");
}

/// **VALUE**: Known settings use fixed labels in a fixed order, unknown keys
/// fall back to camel-case splitting.
///
/// **BUG THIS CATCHES**: Output order depending on map iteration, or a
/// non-boolean value rendered as "enabled".
#[test]
fn given_settings_when_normalizing_then_known_first_then_generic_lines() {
    let settings = UserSettings::from_value(json!({
        "allowWebAccess": false,
        "betaFeatureFlag": true,
        "enableBackgroundComposer": true,
        "maxConcurrentJobs": 4
    }));

    let normalized = normalize_user_settings(&settings);

    assert_eq!(normalized.summary(), USER_SETTINGS_SUMMARY);
    assert_eq!(
        normalized.details(),
        [
            "- enable background composer: enabled".to_string(),
            "- allow web access: disabled".to_string(),
            "- beta feature flag: enabled".to_string(),
            "- max concurrent jobs: 4".to_string(),
        ]
    );
}

/// **VALUE**: Non-boolean values are shown as sent, not coerced to enabled or disabled.
///
/// **BUG THIS CATCHES**: A mode string such as "aggressive" collapsing to
/// "enabled", which hides what the account is actually set to.
#[test]
fn given_string_and_number_settings_when_normalizing_then_values_are_shown_raw() {
    let settings = UserSettings::from_value(json!({
        "privacyMode": "PRIVACY_MODE_NO_TRAINING",
        "retryBudget": 0,
        "teamDefaults": null
    }));

    let normalized = normalize_user_settings(&settings);

    assert_eq!(
        normalized.details(),
        [
            "- privacy mode: PRIVACY_MODE_NO_TRAINING".to_string(),
            "- retry budget: 0".to_string(),
            "- team defaults: disabled".to_string(),
        ]
    );
}

#[test]
fn given_malformed_settings_when_normalizing_then_header_only() {
    let normalized = normalize_user_settings(&UserSettings::from_value(json!([1, 2])));

    assert_eq!(normalized.summary(), USER_SETTINGS_SUMMARY);
    assert!(normalized.details().is_empty());
}

#[test]
fn given_camel_case_keys_when_splitting_then_lowercase_words() {
    assert_eq!(split_camel_case("allowWebAccess"), "allow web access");
    assert_eq!(split_camel_case("simple"), "simple");
}

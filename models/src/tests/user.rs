use crate::{PrivacyModeResponse, UserSettings, WebAccessResponse};

use serde_json::json;

#[test]
fn given_missing_flag_when_checking_web_access_then_disabled() {
    let response: WebAccessResponse = serde_json::from_value(json!({})).unwrap();

    assert!(!response.is_enabled());
    assert!(WebAccessResponse { has_access: Some(true) }.is_enabled());
}

#[test]
fn given_non_object_when_decoding_settings_then_empty() {
    let settings: UserSettings = serde_json::from_value(json!([true, false])).unwrap();

    assert!(settings.is_empty());
}

#[test]
fn given_settings_when_adding_flag_then_serializes_flat_object() {
    let settings = UserSettings::default()
        .with_flag("allowWebAccess", true)
        .with_flag("enableBackgroundComposer", false);

    assert_eq!(settings.flag("allowWebAccess"), Some(true));
    assert_eq!(settings.len(), 2);
    assert_eq!(
        serde_json::to_value(&settings).unwrap(),
        json!({"allowWebAccess": true, "enableBackgroundComposer": false})
    );
}

#[test]
fn given_unknown_privacy_literal_when_decoding_then_kept_raw() {
    let response: PrivacyModeResponse =
        serde_json::from_value(json!({"privacyMode": "PRIVACY_MODE_SOMETHING_NEW"})).unwrap();

    assert_eq!(response.privacy_mode.as_deref(), Some("PRIVACY_MODE_SOMETHING_NEW"));
}

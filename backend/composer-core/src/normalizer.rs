//! Pure mappings from remote responses to [`NormalizedResponse`].
//!
//! None of these fail: malformed or absent input degrades to an empty-state
//! summary.

use models::dashboard::{
    PRIVACY_MODE_FULL_PRIVACY, PRIVACY_MODE_NO_TRAINING, PRIVACY_MODE_TRAINING,
};
use models::{ComposerList, NormalizedResponse, PrivacyModeResponse, UserSettings, WebAccessResponse};

use serde_json::Value;

pub const EMPTY_COMPOSER_LIST_SUMMARY: &str = "No background composers found";
pub const USER_SETTINGS_SUMMARY: &str = "User settings:";

/// Known setting keys and their display labels, in display order.
const KNOWN_SETTINGS: [(&str, &str); 3] = [
    ("enableBackgroundComposer", "enable background composer"),
    ("allowWebAccess", "allow web access"),
    ("privacyMode", "privacy mode"),
];

pub fn normalize_composer_list(list: &ComposerList) -> NormalizedResponse {
    if list.is_empty() {
        return NormalizedResponse::summary_only(EMPTY_COMPOSER_LIST_SUMMARY);
    }

    let details = list
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, composer)| {
            let name = non_blank(composer.name.as_deref()).unwrap_or("Unnamed");
            let status = non_blank(composer.status.as_deref()).unwrap_or("Unknown");
            let mut line = format!("{}. {name} - Status: {status}", index + 1);
            if let Some(description) = non_blank(composer.description.as_deref()) {
                line.push_str(&format!("\n   Description: {description}"));
            }
            line
        })
        .collect();

    NormalizedResponse::new(
        format!("Found {} background composers", list.len()),
        details,
    )
}

/// Lenient entry point for arbitrary JSON (null, non-array and so on).
pub fn normalize_composer_list_value(value: Value) -> NormalizedResponse {
    normalize_composer_list(&ComposerList::from_value(value))
}

pub fn normalize_web_access(response: &WebAccessResponse) -> NormalizedResponse {
    let state = if response.is_enabled() {
        "Enabled"
    } else {
        "Disabled"
    };
    NormalizedResponse::summary_only(format!("Web access: {state}"))
}

/// Human phrase for a privacy literal; unrecognized literals come back unchanged.
pub fn privacy_mode_label(mode: &str) -> &str {
    match mode {
        PRIVACY_MODE_NO_TRAINING => "Data not used for training",
        PRIVACY_MODE_TRAINING => "Data used for training",
        PRIVACY_MODE_FULL_PRIVACY => "Full privacy mode",
        other => other,
    }
}

pub fn normalize_privacy_mode(response: &PrivacyModeResponse) -> NormalizedResponse {
    let label = non_blank(response.privacy_mode.as_deref())
        .map(privacy_mode_label)
        .unwrap_or("Unknown");
    NormalizedResponse::summary_only(format!("Privacy mode: {label}"))
}

pub fn normalize_user_settings(settings: &UserSettings) -> NormalizedResponse {
    let known = KNOWN_SETTINGS
        .iter()
        .filter_map(|(key, label)| settings.get(key).map(|value| setting_line(label, value)));

    let unknown = settings
        .iter()
        .filter(|(key, _)| !KNOWN_SETTINGS.iter().any(|(known, _)| *known == key.as_str()))
        .map(|(key, value)| setting_line(&split_camel_case(key), value));

    NormalizedResponse::new(USER_SETTINGS_SUMMARY, known.chain(unknown).collect())
}

fn setting_line(label: &str, value: &Value) -> String {
    let rendered = match value {
        Value::Bool(true) => String::from("enabled"),
        Value::Bool(false) | Value::Null => String::from("disabled"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    format!("- {label}: {rendered}")
}

/// `allowWebAccess` -> `allow web access`.
pub fn split_camel_case(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() && !words.is_empty() {
            words.push(' ');
        }
        words.push(ch.to_ascii_lowercase());
    }
    words
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

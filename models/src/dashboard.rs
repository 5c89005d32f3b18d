use serde::{Deserialize, Serialize};

pub const PRIVACY_MODE_NO_TRAINING: &str = "PRIVACY_MODE_NO_TRAINING";
pub const PRIVACY_MODE_TRAINING: &str = "PRIVACY_MODE_TRAINING";
pub const PRIVACY_MODE_FULL_PRIVACY: &str = "PRIVACY_MODE_FULL_PRIVACY";

/// Privacy mode literal as reported by the dashboard.
///
/// Kept as a raw string: the remote may emit literals beyond the three known ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacyModeResponse {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub privacy_mode: Option<String>,
}

//! Composer records as reported by the remote service.
//!
//! A composer is created remotely; this side only ever reads it back or asks
//! the remote to transition it (pause, revert, open PR, attach).

pub mod options;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Summary row returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundComposer {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub bc_id: Option<String>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub name: Option<String>,
    /// Free-form lifecycle status (created, running, paused, completed, error by convention).
    #[serde(deserialize_with = "crate::lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub description: Option<String>,
    /// Milliseconds since epoch.
    #[serde(deserialize_with = "crate::lenient::millis")]
    pub created_at_ms: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::millis")]
    pub updated_at_ms: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub source: Option<String>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub repo_url: Option<String>,
}

/// List of composers decoded leniently from whatever the list endpoint returns.
///
/// A bare array and an object wrapping a `composers` array are both accepted.
/// Any other shape (null, string, object without the array) decodes to an
/// empty list; entries that are not objects become empty records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComposerList(pub Vec<BackgroundComposer>);

impl ComposerList {
    pub fn from_value(value: Value) -> Self {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("composers") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[BackgroundComposer] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<BackgroundComposer> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Identifier of the first composer that carries one.
    pub fn first_id(&self) -> Option<&str> {
        self.0.iter().find_map(|c| c.bc_id.as_deref())
    }
}

impl<'de> Deserialize<'de> for ComposerList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

/// Full composer record including its diff and team visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailedComposer {
    #[serde(flatten)]
    pub composer: BackgroundComposer,
    pub diff: Option<Value>,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub team_wide: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffDetailsResponse {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub bc_id: Option<String>,
    pub diff: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangesHashResponse {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub bc_id: Option<String>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenPrResponse {
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub success: Option<bool>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub pr_url: Option<String>,
}

/// Acknowledgement returned by pause, revert-file, attach and attach-logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatedComposer {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub bc_id: Option<String>,
    #[serde(deserialize_with = "crate::lenient::millis")]
    pub created_at_ms: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::millis")]
    pub updated_at_ms: Option<i64>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub workspace_root_path: Option<String>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub repo_url: Option<String>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateComposerResponse {
    #[serde(deserialize_with = "crate::lenient::record")]
    pub composer: Option<CreatedComposer>,
    #[serde(alias = "was_swapped_to_default")]
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub was_swapped_to_default: Option<bool>,
}

impl CreateComposerResponse {
    /// Identifier the remote assigned to the new composer, if it reported one.
    pub fn composer_id(&self) -> Option<&str> {
        self.composer.as_ref().and_then(|c| c.bc_id.as_deref())
    }
}

/// Outcome of a create call.
///
/// `requested_id` is the identifier sent in the request body; the remote may
/// report its own in `response`, which takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerSubmission {
    pub requested_id: String,
    pub response: CreateComposerResponse,
}

impl ComposerSubmission {
    pub fn composer_id(&self) -> &str {
        self.response.composer_id().unwrap_or(&self.requested_id)
    }
}

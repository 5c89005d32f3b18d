use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebAccessResponse {
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub has_access: Option<bool>,
}

impl WebAccessResponse {
    /// Absent flag counts as disabled.
    pub fn is_enabled(&self) -> bool {
        self.has_access.unwrap_or(false)
    }
}

/// Background composer user settings keyed by their remote camel-case names.
///
/// Anything that is not a JSON object decodes to an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserSettings(Map<String, Value>);

impl UserSettings {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn with_flag(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.0.insert(key.into(), Value::Bool(enabled));
        self
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl<'de> Deserialize<'de> for UserSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

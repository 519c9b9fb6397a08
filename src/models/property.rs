use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One listing as returned by the details endpoint.
///
/// The endpoint sends most numbers as strings but is not consistent about it,
/// so scalar fields accept any JSON scalar and keep it as text. Keys this
/// struct does not know about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PropertyRecord {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_scalar_as_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub price_min: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub price_max: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub size_min: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub size_max: String,
    #[serde(rename = "type", default, deserialize_with = "scalar_as_string")]
    pub property_type: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub area: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub zone: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub location: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub radius: String,
    #[serde(default, deserialize_with = "optional_scalar_as_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_as_string")]
    pub highlights: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub status: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub rating: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub tags: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub note: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub city: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub updated_at: String,
    // Relationship lists are not read here, only carried along for the view.
    #[serde(default)]
    pub connections: Value,
    #[serde(default)]
    pub persons: Value,
    #[serde(default)]
    pub links: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertyRecord {
    /// "<type> in <area>", used whenever a listing has to be named in a message.
    pub fn summary(&self) -> String {
        format!("{} in {}", self.property_type, self.area)
    }

    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.summary(),
        }
    }

    pub fn location_label(&self, city: &str) -> String {
        format!("{}, {}", self.area, city)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// Accepts strings, numbers and booleans, null becomes an empty string
fn scalar_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn optional_scalar_as_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

/// Decodes an already parsed JSON object into a record.
pub fn from_object(object: Map<String, Value>) -> Result<PropertyRecord, serde_json::Error> {
    PropertyRecord::deserialize(Value::Object(object))
}

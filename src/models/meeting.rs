use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::names::{coerce_to_string, name_map_from_value, NameMap, NameValue};

/// Title used when the summarizer does not provide one
pub const DEFAULT_MEETING_TITLE: &str = "Meeting_Report";

/// Structured meeting data returned by the summarization model
///
/// Every field is optional and tolerant of the wrong JSON type: text fields
/// coerce scalars to strings and mapping fields fall back to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingData {
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(rename = "meeting title", default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(rename = "meeting id", default, deserialize_with = "lenient_text")]
    pub meeting_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub members: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub decisions: String,
    #[serde(rename = "key extractions", default)]
    pub key_extractions: KeyExtractions,
    /// Per-speaker contribution summaries keyed by speaker label
    #[serde(default, deserialize_with = "lenient_text_map")]
    pub speakers: IndexMap<String, String>,
    /// Per-speaker classification keyed by speaker label
    #[serde(default, deserialize_with = "lenient_classification")]
    pub classification: IndexMap<String, Classification>,
    /// Direct speaker label -> inferred name mapping
    #[serde(default, deserialize_with = "lenient_name_map")]
    pub predicted_names: NameMap,
}

/// Inferred identity of a single speaker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default, deserialize_with = "lenient_text")]
    pub predicted_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
}

/// Action items extracted from the meeting, in whatever shape the model chose
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum KeyExtractions {
    #[default]
    None,
    /// A list of records such as `{taskName, taskDescription, assigneeName}`
    List(Vec<Value>),
    /// A single record
    Fields(Map<String, Value>),
    Text(String),
}

impl From<Value> for KeyExtractions {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::None,
            Value::Array(items) if items.is_empty() => Self::None,
            Value::Array(items) => Self::List(items),
            Value::Object(fields) => Self::Fields(fields),
            Value::String(s) if s.is_empty() => Self::None,
            other => Self::Text(coerce_to_string(&other)),
        }
    }
}

impl From<KeyExtractions> for Value {
    fn from(value: KeyExtractions) -> Self {
        match value {
            KeyExtractions::None => Value::Null,
            KeyExtractions::List(items) => Value::Array(items),
            KeyExtractions::Fields(fields) => Value::Object(fields),
            KeyExtractions::Text(s) => Value::String(s),
        }
    }
}

impl KeyExtractions {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl MeetingData {
    /// Meeting title, or the default when the model left it blank
    pub fn title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_MEETING_TITLE
        } else {
            &self.title
        }
    }

    /// Names inferred by the summarizer
    ///
    /// Prefers `predicted_names`; otherwise projects `predicted_name` out of
    /// `classification`.
    pub fn inferred_names(&self) -> NameMap {
        if !self.predicted_names.is_empty() {
            return self.predicted_names.clone();
        }

        self.classification
            .iter()
            .map(|(label, class)| {
                let value = if class.predicted_name.is_empty() {
                    NameValue::Missing
                } else {
                    NameValue::Plain(class.predicted_name.clone())
                };
                (label.clone(), value)
            })
            .collect()
    }

    /// Whether the speaker identification section can be rendered
    pub fn has_speaker_identification(&self) -> bool {
        !self.speakers.is_empty()
            && !self.classification.is_empty()
            && !self.predicted_names.is_empty()
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_to_string(&value))
}

fn lenient_text_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(fields) => fields
            .into_iter()
            .map(|(k, v)| (k, coerce_to_string(&v)))
            .collect(),
        _ => IndexMap::new(),
    })
}

fn lenient_classification<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, Classification>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(fields) => fields
            .into_iter()
            .map(|(k, v)| {
                // Entries that are not records carry no classification
                let class: Classification = serde_json::from_value(v).unwrap_or_default();
                (k, class)
            })
            .collect(),
        _ => IndexMap::new(),
    })
}

fn lenient_name_map<'de, D>(deserializer: D) -> Result<NameMap, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(name_map_from_value(value))
}

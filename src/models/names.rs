use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Speaker label mapping in source order (e.g. "Speaker 1" -> "Kiran")
pub type NameMap = IndexMap<String, NameValue>;

/// One party's belief about a speaker's real name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum NameValue {
    /// A bare name string
    Plain(String),
    /// A structured record carrying a `name` field plus arbitrary extras
    Record(NameRecord),
    /// Null or absent
    Missing,
}

/// Structured name record, e.g. `{"name": "Kiran", "role": "Lead"}`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NameRecord {
    /// The `name` field coerced to a string, if present
    pub name: Option<String>,
    /// Every other field of the record
    pub details: Map<String, Value>,
}

impl NameValue {
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(NameRecord {
            name: Some(name.into()),
            details: Map::new(),
        })
    }
}

impl From<Value> for NameValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => Self::Plain(s),
            Value::Object(mut fields) => {
                let name = fields.remove("name").map(|v| coerce_to_string(&v));
                Self::Record(NameRecord {
                    name,
                    details: fields,
                })
            }
            other => Self::Plain(coerce_to_string(&other)),
        }
    }
}

impl From<NameValue> for Value {
    fn from(value: NameValue) -> Self {
        match value {
            NameValue::Plain(s) => Value::String(s),
            NameValue::Missing => Value::Null,
            NameValue::Record(record) => {
                let mut fields = Map::new();
                if let Some(name) = record.name {
                    fields.insert("name".to_string(), Value::String(name));
                }
                fields.extend(record.details);
                Value::Object(fields)
            }
        }
    }
}

/// Coerce a JSON value into display text
///
/// Null becomes empty, scalars use their JSON text, arrays join their items
/// with commas and objects yield nothing.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => String::new(),
    }
}

/// Build a name map from an arbitrary JSON value
///
/// Anything that is not an object yields an empty map.
pub fn name_map_from_value(value: Value) -> NameMap {
    match value {
        Value::Object(fields) => fields
            .into_iter()
            .map(|(label, v)| (label, NameValue::from(v)))
            .collect(),
        _ => NameMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_value_from_json() {
        assert_eq!(NameValue::from(json!("Kiran")), NameValue::plain("Kiran"));
        assert_eq!(NameValue::from(json!(null)), NameValue::Missing);
        assert_eq!(NameValue::from(json!(42)), NameValue::plain("42"));

        match NameValue::from(json!({"name": "Kiran", "role": "Lead"})) {
            NameValue::Record(record) => {
                assert_eq!(record.name.as_deref(), Some("Kiran"));
                assert_eq!(record.details.get("role"), Some(&json!("Lead")));
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_record_without_name() {
        match NameValue::from(json!({"role": "Lead"})) {
            NameValue::Record(record) => assert!(record.name.is_none()),
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_name_map_preserves_document_order() {
        let map: NameMap =
            serde_json::from_str(r#"{"Speaker 2": "Rupa", "Speaker 1": {"name": "Kiran"}}"#)
                .unwrap();
        let labels: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Speaker 2", "Speaker 1"]);
        assert_eq!(map["Speaker 1"], NameValue::record("Kiran"));
    }

    #[test]
    fn test_name_map_from_non_object() {
        assert!(name_map_from_value(json!([1, 2])).is_empty());
        assert!(name_map_from_value(json!("Kiran")).is_empty());
        assert!(name_map_from_value(json!(null)).is_empty());
    }

    #[test]
    fn test_coerce_array() {
        assert_eq!(coerce_to_string(&json!(["a", 1, null])), "a,1,");
    }
}

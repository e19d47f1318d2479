use indexmap::IndexMap;

use crate::models::{NameMap, NameValue};

/// Speaker labels and names after normalization, in first-seen key order
pub type NormalizedNames = IndexMap<String, String>;

/// Canonicalize a speaker label into a join key
///
/// Drops whitespace, hyphens and underscores and lowercases the rest, so
/// "Speaker-1", "speaker 1" and "SPEAKER_1" all become "speaker1".
pub fn normalize_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Extract a comparable name from a plain or structured name value
pub fn extract_name(value: &NameValue) -> String {
    let raw = match value {
        NameValue::Plain(name) => name.as_str(),
        NameValue::Record(record) => record.name.as_deref().unwrap_or(""),
        NameValue::Missing => "",
    };
    raw.trim().to_lowercase()
}

/// Normalize both sides of a name mapping
///
/// Labels that collapse to the same key keep their first position and take
/// the last value.
pub fn normalize_names(names: &NameMap) -> NormalizedNames {
    let mut normalized = NormalizedNames::with_capacity(names.len());
    for (label, value) in names {
        normalized.insert(normalize_key(label), extract_name(value));
    }
    normalized
}

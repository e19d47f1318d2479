use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{name_map_from_value, MeetingData, NameMap};

/// Failure to read a ground-truth name mapping
#[derive(Debug, Error)]
pub enum NameInputError {
    #[error("actual names are not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("actual names must be a JSON object, got {0}")]
    NotAMapping(&'static str),
}

/// Failure to interpret the summarizer's response as meeting data
#[derive(Debug, Error)]
pub enum MeetingDataError {
    #[error("summarizer returned an empty response")]
    Empty,
    #[error("summarizer returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a meeting object, got {0}")]
    UnexpectedShape(&'static str),
}

/// Parse a JSON-encoded speaker label -> name mapping
///
/// A JSON string whose content is itself encoded JSON is decoded once more,
/// which is how form submissions usually deliver the mapping.
pub fn try_parse_name_map(raw: &str) -> Result<NameMap, NameInputError> {
    let value = match serde_json::from_str::<Value>(raw)? {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };

    match value {
        Value::Object(_) => Ok(name_map_from_value(value)),
        other => Err(NameInputError::NotAMapping(json_kind(&other))),
    }
}

/// Parse ground-truth names, treating any failure as an empty mapping
pub fn parse_actual_names(raw: &str) -> NameMap {
    match try_parse_name_map(raw) {
        Ok(names) => names,
        Err(e) => {
            warn!("Ignoring actual names: {}", e);
            NameMap::new()
        }
    }
}

/// Load ground-truth names from a file path or an inline JSON string
pub fn load_actual_names(source: &str) -> Result<NameMap> {
    let path = Path::new(source);
    if path.is_file() {
        debug!("Reading actual names from {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        return Ok(parse_actual_names(&content));
    }
    Ok(parse_actual_names(source))
}

/// Parse the summarizer's raw text response into meeting data
///
/// Accepts a bare object or an array whose first element is the object,
/// optionally wrapped in a Markdown code fence. An empty array yields empty
/// meeting data.
pub fn parse_meeting_response(text: &str) -> Result<MeetingData, MeetingDataError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(MeetingDataError::Empty);
    }

    let value = match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(MeetingData::default()),
        },
        other => other,
    };

    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(MeetingDataError::UnexpectedShape(json_kind(&other))),
    }
}

/// Load previously generated meeting data from a JSON file
pub fn load_meeting_data(path: &Path) -> Result<MeetingData> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_meeting_response(&content)
        .with_context(|| format!("Failed to parse meeting data: {:?}", path))
}

/// Read a meeting transcript, rejecting empty input
pub fn read_transcript(path: &Path) -> Result<String> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    if content.trim().is_empty() {
        anyhow::bail!("Transcript text is required, {:?} is empty", path);
    }
    Ok(content)
}

/// Remove a surrounding ``` fence (with optional language tag)
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return "",
    };

    match body.rfind("```") {
        Some(idx) if body[idx..].trim() == "```" => body[..idx].trim(),
        _ => body.trim(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use std::collections::HashSet;

use crate::models::MeetingData;
use crate::stages::{extract_name, normalize_key};

const HONORIFICS: &[&str] = &["sir", "madam", "dr", "mr", "mrs", "ms"];

/// Configuration for meeting data validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reject responses without a summary
    pub require_summary: bool,
    /// Reject predicted names that still carry a title such as "Dr." or "Sir"
    pub reject_honorifics: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_summary: true,
            reject_honorifics: true,
        }
    }
}

/// Result of validating a summarizer response
#[derive(Debug, Clone)]
pub struct MeetingValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl MeetingValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

/// Validate meeting data against the summarization rules
pub fn validate_meeting_data(data: &MeetingData, config: &ValidationConfig) -> MeetingValidation {
    let mut errors = Vec::new();

    // 1. Summary present
    if config.require_summary && data.summary.trim().is_empty() {
        errors.push("Summary is missing".to_string());
    }

    // 2. No speaker labels beyond those described in "speakers"
    if !data.speakers.is_empty() {
        let known: HashSet<String> = data.speakers.keys().map(|l| normalize_key(l)).collect();

        let labels = data
            .predicted_names
            .keys()
            .map(|l| ("predicted_names", l))
            .chain(data.classification.keys().map(|l| ("classification", l)));

        for (field, label) in labels {
            if !known.contains(&normalize_key(label)) {
                errors.push(format!("Unknown speaker label {:?} in {}", label, field));
            }
        }
    }

    // 3. Names without honorifics
    if config.reject_honorifics {
        let names = data
            .predicted_names
            .iter()
            .map(|(label, value)| (label, extract_name(value)))
            .chain(
                data.classification
                    .iter()
                    .map(|(label, class)| (label, class.predicted_name.to_lowercase())),
            );

        for (label, name) in names {
            if has_honorific(&name) {
                errors.push(format!("Predicted name for {:?} has an honorific: {:?}", label, name));
            }
        }
    }

    if errors.is_empty() {
        MeetingValidation::valid()
    } else {
        MeetingValidation::invalid(errors)
    }
}

/// Check a lowercased name for a title word such as "dr." or "sir"
fn has_honorific(name: &str) -> bool {
    name.split_whitespace()
        .map(|word| word.trim_matches(|c: char| c == '.' || c == ','))
        .any(|word| HONORIFICS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(json: &str) -> MeetingData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_validate_valid_meeting() {
        let data = meeting(
            r#"{
                "summary": "Planning call.",
                "speakers": {"Speaker 0": "Led the call."},
                "classification": {"Speaker 0": {"predicted_name": "Kiran"}},
                "predicted_names": {"speaker-0": "Kiran"}
            }"#,
        );

        let result = validate_meeting_data(&data, &ValidationConfig::default());

        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_validate_missing_summary() {
        let result = validate_meeting_data(&MeetingData::default(), &ValidationConfig::default());

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Summary is missing"]);
    }

    #[test]
    fn test_validate_unknown_speaker_label() {
        let data = meeting(
            r#"{
                "summary": "Planning call.",
                "speakers": {"Speaker 0": "Led the call."},
                "predicted_names": {"Speaker 0": "Kiran", "Anuj": "Anuj"}
            }"#,
        );

        let result = validate_meeting_data(&data, &ValidationConfig::default());

        assert!(!result.is_valid);
        assert!(result.errors[0].contains("Unknown speaker label \"Anuj\""));
    }

    #[test]
    fn test_validate_honorifics() {
        let data = meeting(
            r#"{
                "summary": "Planning call.",
                "classification": {"Speaker 1": {"predicted_name": "Dr. Rupa"}},
                "predicted_names": {"Speaker 0": "Kiran Sir"}
            }"#,
        );

        let result = validate_meeting_data(&data, &ValidationConfig::default());
        assert_eq!(result.errors.len(), 2);

        let lenient = ValidationConfig {
            reject_honorifics: false,
            ..Default::default()
        };
        assert!(validate_meeting_data(&data, &lenient).is_valid);
    }

    #[test]
    fn test_has_honorific() {
        assert!(has_honorific("dr. rupa"));
        assert!(has_honorific("kiran sir"));
        assert!(!has_honorific("sirisha"));
        assert!(!has_honorific("drew"));
    }
}

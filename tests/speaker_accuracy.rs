use std::fs;

use minutes::{
    compute_metrics, evaluate_speaker_names, execute_render, extract_name, load_actual_names,
    load_meeting_data, normalize_key, parse_actual_names, parse_meeting_response, reconcile,
    NameMap, NameValue, RenderConfig, SkipReason, SpeakerAccuracy,
};

const LLM_RESPONSE: &str = r#"```json
[
  {
    "summary": "The team reviewed presentation templates and agreed on brand guidelines.",
    "meeting title": "Brand Guidelines Review",
    "meeting id": "BGR-7",
    "duration": "45 minutes",
    "members": "Kiran, Rupa, Anuj",
    "decisions": "Use the new template for all client decks.",
    "key extractions": [
      {
        "taskName": "Template rollout",
        "taskDescription": "Share the template",
        "assigneeName": "Rupa"
      }
    ],
    "speakers": {
      "Speaker 0": "Opened the session and stressed brand consistency.",
      "Speaker 1": "Walked through the sample deck.",
      "Speaker 2": "Confirmed audio and video."
    },
    "classification": {
      "Speaker 0": {"predicted_name": "Kiran", "department": "Business Unit", "role": "Lead"},
      "Speaker 1": {"predicted_name": "Rupa", "department": "Technical Unit", "role": "Designer"},
      "Speaker 2": {"predicted_name": "Azim", "department": "Technical Unit", "role": "Engineer"}
    },
    "predicted_names": {
      "Speaker 0": "Kiran",
      "Speaker 1": "Rupa",
      "Speaker 2": "Azim"
    }
  }
]
```"#;

fn single(label: &str, value: NameValue) -> NameMap {
    let mut names = NameMap::new();
    names.insert(label.to_string(), value);
    names
}

#[test]
fn test_label_normalization_equivalence() {
    let key = normalize_key("Speaker-1");
    assert_eq!(key, normalize_key("speaker 1"));
    assert_eq!(key, normalize_key("SPEAKER_1"));
    assert_eq!(normalize_key(&key), key);
}

#[test]
fn test_structured_name_values() {
    let record = parse_actual_names(r#"{"s": {"name": "Kiran", "role": "Lead"}}"#);
    assert_eq!(extract_name(&record["s"]), "kiran");
    assert_eq!(extract_name(&NameValue::plain("Kiran")), "kiran");
    assert_eq!(extract_name(&NameValue::Missing), "");
}

#[test]
fn test_perfect_match_metrics() {
    let actual = single("Speaker 1", NameValue::plain("Kiran"));
    let inferred = single("Speaker 1", NameValue::plain("Kiran"));

    let metrics = compute_metrics(&reconcile(&actual, &inferred));

    assert_eq!(metrics.true_positives, 1);
    assert_eq!(metrics.false_positives, 0);
    assert_eq!(metrics.false_negatives, 0);
    assert_eq!(metrics.accuracy, 100.0);
    assert_eq!(metrics.precision, 100.0);
    assert_eq!(metrics.recall, 100.0);
    assert_eq!(metrics.f1_score, 1.0);
}

#[test]
fn test_total_mismatch_metrics() {
    let actual = single("Speaker 1", NameValue::plain("Kiran"));
    let inferred = single("Speaker 1", NameValue::plain("Manish"));

    let metrics = compute_metrics(&reconcile(&actual, &inferred));

    assert_eq!(metrics.true_positives, 0);
    assert_eq!(metrics.false_positives, 1);
    assert_eq!(metrics.false_negatives, 1);
    assert_eq!(metrics.unmatched_names.len(), 2);
    assert_eq!(metrics.f1_score, 0.0);
}

#[test]
fn test_missing_inference_metrics() {
    let actual = single("Speaker 1", NameValue::plain("Kiran"));

    let metrics = compute_metrics(&reconcile(&actual, &NameMap::new()));

    assert_eq!(metrics.false_negatives, 1);
    assert_eq!(metrics.true_positives, 0);
    assert_eq!(metrics.false_positives, 0);
    assert_eq!(metrics.recall, 0.0);
    assert_eq!(metrics.precision, 0.0);
    assert_eq!(metrics.accuracy, 0.0);
}

#[test]
fn test_format_insensitive_end_to_end() {
    let actual = parse_actual_names(r#"{"SPEAKER-0": "Kiran"}"#);
    let inferred = parse_actual_names(r#"{"Speaker 0": {"name": "KIRAN"}}"#);

    let tally = reconcile(&actual, &inferred);

    assert_eq!(tally.true_positives, 1);
    assert!(tally.unmatched_names.is_empty());
}

#[test]
fn test_malformed_inputs_yield_zero_metrics() {
    for raw in ["null", "{}", "7", "\"text\"", "[]", "{broken"] {
        let names = parse_actual_names(raw);
        let metrics = compute_metrics(&reconcile(&names, &names));

        assert_eq!(metrics.true_positives, 0, "input {:?}", raw);
        assert_eq!(metrics.false_positives, 0);
        assert_eq!(metrics.false_negatives, 0);
        assert_eq!(metrics.accuracy, 0.0);
        assert!(metrics.matching_names.is_empty());
        assert!(metrics.unmatched_names.is_empty());
    }
}

#[test]
fn test_evaluate_llm_response() {
    let meeting = parse_meeting_response(LLM_RESPONSE).unwrap();
    let actual = parse_actual_names(
        r#"{"speaker_0": "Kiran", "Speaker-1": {"name": "Rupa"}, "speaker 2": "Anuj"}"#,
    );

    let accuracy = evaluate_speaker_names(Some(&actual), &meeting);
    let metrics = accuracy.metrics().unwrap();

    assert_eq!(metrics.true_positives, 2);
    assert_eq!(metrics.false_positives, 1);
    assert_eq!(metrics.false_negatives, 1);
    assert_eq!(metrics.accuracy, 50.0);
    assert_eq!(
        metrics.unmatched_names,
        vec![
            r#"speaker2: expected "anuj", got "azim""#,
            r#"speaker2: expected "anuj", got "none""#,
        ]
    );
}

#[test]
fn test_report_files() {
    let dir = tempfile::tempdir().unwrap();
    let meeting_path = dir.path().join("meeting.json");
    let names_path = dir.path().join("actual.json");
    let report_path = dir.path().join("report.json");
    let text_path = dir.path().join("report.txt");

    fs::write(&meeting_path, LLM_RESPONSE).unwrap();
    fs::write(&names_path, r#"{"Speaker 0": "Kiran", "Speaker 1": "Rupa"}"#).unwrap();

    let meeting = load_meeting_data(&meeting_path).unwrap();
    let actual = load_actual_names(names_path.to_str().unwrap()).unwrap();
    let accuracy = evaluate_speaker_names(Some(&actual), &meeting);

    execute_render(
        &meeting,
        &accuracy,
        Some(&report_path),
        Some(&text_path),
        &RenderConfig::default(),
    )
    .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["meeting"]["title"], "Brand Guidelines Review");
    assert_eq!(json["speakers"].as_array().unwrap().len(), 3);
    assert_eq!(json["speaker_accuracy"]["status"], "evaluated");
    assert_eq!(json["speaker_accuracy"]["metrics"]["truePositives"], 2);
    // Azim is inferred for a speaker with no ground truth
    assert_eq!(json["speaker_accuracy"]["metrics"]["falsePositives"], 1);

    let text = fs::read_to_string(&text_path).unwrap();
    assert!(text.starts_with("Brand Guidelines Review\n"));
    assert!(text.contains("Speaker Identification:"));
    assert!(text.contains("Role: Designer"));
    assert!(text.contains("Speaker Name Accuracy:"));
    assert!(text.contains("Precision: 66.67%"));
    assert!(text.contains("Recall: 100.00%"));
}

#[test]
fn test_report_without_ground_truth() {
    let meeting = parse_meeting_response(LLM_RESPONSE).unwrap();

    let accuracy = evaluate_speaker_names(None, &meeting);

    assert_eq!(accuracy, SpeakerAccuracy::Skipped(SkipReason::NoGroundTruth));
    assert_eq!(
        accuracy.section_text(),
        "No actualNames provided; skipping speaker name evaluation."
    );
}

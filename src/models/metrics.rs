use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw reconciliation counts plus their explanations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// `"{key}: {name}"` for every correctly inferred speaker
    pub matching_names: Vec<String>,
    /// `"{key}: expected \"..\", got \"..\""` for every wrong or missing inference
    pub unmatched_names: Vec<String>,
}

impl Tally {
    pub fn is_empty(&self) -> bool {
        self.true_positives == 0 && self.false_positives == 0 && self.false_negatives == 0
    }
}

/// Speaker name classification metrics
///
/// `accuracy`, `precision` and `recall` are percentages in [0, 100];
/// `f1_score` is a ratio in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Always zero: there is no closed universe of non-speakers to count
    pub true_negatives: usize,
    pub matching_names: Vec<String>,
    pub unmatched_names: Vec<String>,
}

/// Why speaker name evaluation did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("No actualNames provided; skipping speaker name evaluation.")]
    NoGroundTruth,
    #[error("Inferred names data is not available or not in the expected format.")]
    NoInferredNames,
}

/// Outcome of the speaker name accuracy evaluation for one report
#[derive(Debug, Clone, PartialEq)]
pub enum SpeakerAccuracy {
    Evaluated(Metrics),
    Skipped(SkipReason),
}

impl SpeakerAccuracy {
    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            Self::Evaluated(metrics) => Some(metrics),
            Self::Skipped(_) => None,
        }
    }

    /// One-line outcome for logs
    ///
    /// The denominator is TP+FP+FN, which counts a misnamed speaker twice,
    /// so it is labelled rather than read as a speaker count.
    pub fn summary_line(&self) -> String {
        match self {
            Self::Evaluated(metrics) => format!(
                "speaker name accuracy {:.2}% ({} TP / {} TP+FP+FN)",
                metrics.accuracy,
                metrics.true_positives,
                metrics.true_positives + metrics.false_positives + metrics.false_negatives
            ),
            Self::Skipped(reason) => reason.to_string(),
        }
    }

    /// Plain text body of the "Speaker Name Accuracy" report section
    pub fn section_text(&self) -> String {
        let metrics = match self {
            Self::Evaluated(metrics) => metrics,
            Self::Skipped(reason) => return reason.to_string(),
        };

        let mut lines = vec![
            format!("Accuracy: {:.2}%", metrics.accuracy),
            format!("Precision: {:.2}%", metrics.precision),
            format!("Recall: {:.2}%", metrics.recall),
            format!("F1-Score: {:.2}", metrics.f1_score),
            format!("True Positives: {}", metrics.true_positives),
            format!("False Positives: {}", metrics.false_positives),
            format!("False Negatives: {}", metrics.false_negatives),
        ];

        lines.push("Matching Names:".to_string());
        push_list(&mut lines, &metrics.matching_names);
        lines.push("Unmatched Names:".to_string());
        push_list(&mut lines, &metrics.unmatched_names);

        lines.join("\n")
    }
}

fn push_list(lines: &mut Vec<String>, items: &[String]) {
    if items.is_empty() {
        lines.push("  None".to_string());
    } else {
        lines.extend(items.iter().map(|item| format!("  - {}", item)));
    }
}

/// JSON form of [`SpeakerAccuracy`] for the machine-readable report
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpeakerAccuracyReport {
    Evaluated { metrics: Metrics },
    Skipped { message: String },
}

impl From<&SpeakerAccuracy> for SpeakerAccuracyReport {
    fn from(accuracy: &SpeakerAccuracy) -> Self {
        match accuracy {
            SpeakerAccuracy::Evaluated(metrics) => Self::Evaluated {
                metrics: metrics.clone(),
            },
            SpeakerAccuracy::Skipped(reason) => Self::Skipped {
                message: reason.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> Metrics {
        Metrics {
            accuracy: 50.0,
            precision: 100.0,
            recall: 50.0,
            f1_score: 2.0 / 3.0,
            true_positives: 1,
            false_positives: 0,
            false_negatives: 1,
            true_negatives: 0,
            matching_names: vec!["speaker1: kiran".to_string()],
            unmatched_names: vec![],
        }
    }

    #[test]
    fn test_section_text_evaluated() {
        let text = SpeakerAccuracy::Evaluated(sample_metrics()).section_text();

        assert!(text.contains("Accuracy: 50.00%"));
        assert!(text.contains("Precision: 100.00%"));
        assert!(text.contains("F1-Score: 0.67"));
        assert!(text.contains("False Negatives: 1"));
        assert!(text.contains("  - speaker1: kiran"));
        assert!(text.ends_with("Unmatched Names:\n  None"));
    }

    #[test]
    fn test_section_text_skipped() {
        let text = SpeakerAccuracy::Skipped(SkipReason::NoGroundTruth).section_text();
        assert_eq!(
            text,
            "No actualNames provided; skipping speaker name evaluation."
        );
    }

    #[test]
    fn test_summary_line_labels_denominator() {
        let mut metrics = sample_metrics();
        metrics.accuracy = 100.0 / 3.0;
        metrics.false_positives = 1;

        let line = SpeakerAccuracy::Evaluated(metrics).summary_line();
        assert_eq!(line, "speaker name accuracy 33.33% (1 TP / 3 TP+FP+FN)");

        let skipped = SpeakerAccuracy::Skipped(SkipReason::NoInferredNames).summary_line();
        assert_eq!(
            skipped,
            "Inferred names data is not available or not in the expected format."
        );
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let json = serde_json::to_value(sample_metrics()).unwrap();
        assert_eq!(json["truePositives"], 1);
        assert_eq!(json["trueNegatives"], 0);
        assert!(json.get("f1Score").is_some());
        assert!(json.get("matchingNames").is_some());
    }

    #[test]
    fn test_accuracy_report_tagging() {
        let skipped = SpeakerAccuracyReport::from(&SpeakerAccuracy::Skipped(
            SkipReason::NoInferredNames,
        ));
        let json = serde_json::to_value(skipped).unwrap();
        assert_eq!(json["status"], "skipped");
        assert!(json["message"].as_str().unwrap().starts_with("Inferred names"));
    }
}

use tracing::info;

use crate::models::{MeetingData, Metrics, NameMap, SkipReason, SpeakerAccuracy, Tally};

use super::stage2_reconcile::reconcile;

/// Execute Stage 3: derive classification metrics from a tally
///
/// Every ratio with a zero denominator is reported as 0.
pub fn compute_metrics(tally: &Tally) -> Metrics {
    let tp = tally.true_positives as f64;
    let fp = tally.false_positives as f64;
    let fn_ = tally.false_negatives as f64;

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1_score = ratio(2.0 * precision * recall, precision + recall);
    let accuracy = ratio(tp, tp + fp + fn_);

    Metrics {
        accuracy: accuracy * 100.0,
        precision: precision * 100.0,
        recall: recall * 100.0,
        f1_score,
        true_positives: tally.true_positives,
        false_positives: tally.false_positives,
        false_negatives: tally.false_negatives,
        true_negatives: 0,
        matching_names: tally.matching_names.clone(),
        unmatched_names: tally.unmatched_names.clone(),
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Evaluate the summarizer's speaker names against user-supplied ground truth
///
/// Skips evaluation when either side has nothing to compare.
pub fn evaluate_speaker_names(actual: Option<&NameMap>, meeting: &MeetingData) -> SpeakerAccuracy {
    let actual = match actual {
        Some(names) if !names.is_empty() => names,
        _ => {
            info!("Stage 3: no ground-truth names, skipping evaluation");
            return SpeakerAccuracy::Skipped(SkipReason::NoGroundTruth);
        }
    };

    let inferred = meeting.inferred_names();
    if inferred.is_empty() {
        info!("Stage 3: no inferred names, skipping evaluation");
        return SpeakerAccuracy::Skipped(SkipReason::NoInferredNames);
    }

    let tally = reconcile(actual, &inferred);
    let metrics = compute_metrics(&tally);

    info!(
        "Stage 3: accuracy {:.2}%, precision {:.2}%, recall {:.2}%, F1 {:.2}",
        metrics.accuracy, metrics.precision, metrics.recall, metrics.f1_score
    );

    SpeakerAccuracy::Evaluated(metrics)
}

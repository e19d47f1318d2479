use tracing::{debug, info};

use crate::models::{NameMap, Tally};

use super::stage0_normalize::normalize_names;

/// Execute Stage 2: reconcile ground-truth names against inferred names
///
/// Both mappings are normalized first, then:
/// 1. Every inferred name is a true positive if it equals the actual name for
///    the same key, a false positive if it is non-empty and wrong, and
///    otherwise ignored
/// 2. Every actual name that was not inferred correctly is a false negative
///
/// A key with two different names therefore counts as both a false positive
/// and a false negative.
pub fn reconcile(actual: &NameMap, inferred: &NameMap) -> Tally {
    let actual = normalize_names(actual);
    let inferred = normalize_names(inferred);

    let mut tally = Tally::default();

    for (key, inferred_name) in &inferred {
        let actual_name = actual.get(key);

        if actual_name == Some(inferred_name) {
            tally.true_positives += 1;
            tally.matching_names.push(format!("{}: {}", key, inferred_name));
        } else if !inferred_name.is_empty() {
            tally.false_positives += 1;
            tally.unmatched_names.push(format!(
                "{}: expected \"{}\", got \"{}\"",
                key,
                actual_name.map(String::as_str).unwrap_or("none"),
                inferred_name
            ));
        } else {
            debug!("Speaker {}: no name inferred and none expected", key);
        }
    }

    for (key, actual_name) in &actual {
        if inferred.get(key) == Some(actual_name) {
            continue;
        }

        tally.false_negatives += 1;
        let explanation = format!("{}: expected \"{}\", got \"none\"", key, actual_name);
        if !tally.unmatched_names.contains(&explanation) {
            tally.unmatched_names.push(explanation);
        }
    }

    info!(
        "Stage 2: {} matched, {} false positives, {} false negatives",
        tally.true_positives, tally.false_positives, tally.false_negatives
    );

    tally
}

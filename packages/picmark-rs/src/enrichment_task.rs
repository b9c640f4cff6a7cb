//! The per-image unit of work dispatched by the engine.
use picmark_labels::{LabelDetector, LabelSet};
use tracing::debug;

use crate::observer::EnrichmentObserver;
use crate::result::{EnrichmentResult, Label, Location};

/// Converts a detection response into result labels.
///
/// Only labels with at least one boxed instance contribute an entry, with one
/// location per boxed instance. Service order is kept.
pub fn labels_from(set: &LabelSet) -> Vec<Label> {
    set.labels
        .iter()
        .filter(|label| label.is_localized())
        .map(|label| Label {
            title: label.name.clone(),
            locations: label.boxes().map(Location::from).collect(),
        })
        .collect()
}

/// Runs one detection call for `key`. Never fails: a detection error becomes a
/// result with no labels and the error recorded.
pub(crate) async fn run_task(
    detector: &dyn LabelDetector,
    observer: &dyn EnrichmentObserver,
    key: String,
) -> EnrichmentResult {
    debug!(key = %key, "starting enrichment task");
    match detector.detect_labels(&key).await {
        Ok(set) => {
            let values = labels_from(&set);
            debug!(key = %key, detected = set.labels.len(), localized = values.len(), "enrichment task finished");
            EnrichmentResult::new(key, values)
        }
        Err(error) => {
            observer.on_detection_failed(&key, &error);
            EnrichmentResult::failed(key, &error)
        }
    }
}

/// Enriches a single image without going through a batch.
pub async fn enrich_one(
    detector: &dyn LabelDetector,
    observer: &dyn EnrichmentObserver,
    key: impl Into<String>,
) -> EnrichmentResult {
    run_task(detector, observer, key.into()).await
}

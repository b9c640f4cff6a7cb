//! Fan-out/fan-in over a batch of image keys.
//!
//! One tokio task is spawned per key, in input order. Every task reports
//! `(index, result)` on a channel sized to the batch, and the collector writes
//! each message into the slot of its originating index, so `results[i]` always
//! belongs to `identifiers[i]` whatever order the tasks finish in.
//!
//! There is no engine-level timeout or cancellation: a batch finishes when its
//! slowest detector call does. Bound individual calls in the detector (the HTTP
//! client carries a request timeout).
use std::sync::Arc;
use std::time::Instant;

use picmark_labels::LabelDetector;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info};

use crate::enrichment_task::run_task;
use crate::observer::{BatchSummary, EnrichmentObserver, TracingObserver};
use crate::result::{EnrichmentResult, FailureKind};

/// Options for the enrichment engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum number of detector calls in flight. `None` runs every task of a
    /// batch at once, which for large batches can trip service rate limits.
    /// The cap is clamped to `1..=batch size`, so `Some(0)` acts as `Some(1)`
    /// and caps larger than the batch act as unbounded.
    pub max_concurrency: Option<usize>,
}

impl EngineOptions {
    pub fn bounded(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: Some(max_concurrency),
        }
    }
}

pub struct EnrichmentEngine {
    detector: Arc<dyn LabelDetector>,
    observer: Arc<dyn EnrichmentObserver>,
    options: EngineOptions,
}

impl EnrichmentEngine {
    /// Creates an unbounded engine that logs through `tracing`.
    pub fn new(detector: Arc<dyn LabelDetector>) -> Self {
        Self::with_options(detector, EngineOptions::default())
    }

    pub fn with_options(detector: Arc<dyn LabelDetector>, options: EngineOptions) -> Self {
        Self {
            detector,
            observer: Arc::new(TracingObserver),
            options,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn EnrichmentObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Enriches every key and returns one result per key, in input order.
    ///
    /// Never fails. Detection errors come back as results with empty labels and
    /// the error recorded; a task that dies without reporting is filled in as
    /// [`FailureKind::TaskAborted`].
    pub async fn enrich(&self, identifiers: Vec<String>) -> Vec<EnrichmentResult> {
        let total = identifiers.len();
        if total == 0 {
            return Vec::new();
        }

        let started = Instant::now();
        let semaphore = self
            .options
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.clamp(1, total))));

        info!(total, max_concurrency = ?self.options.max_concurrency, "dispatching enrichment batch");

        // Capacity equals the batch, so no task ever waits to report.
        let (tx, mut rx) = mpsc::channel::<(usize, EnrichmentResult)>(total);

        for (index, key) in identifiers.iter().enumerate() {
            let tx = tx.clone();
            let key = key.clone();
            let detector = self.detector.clone();
            let observer = self.observer.clone();
            let semaphore = semaphore.clone();

            tokio::spawn(async move {
                let _permit = match &semaphore {
                    Some(semaphore) => semaphore.acquire().await.ok(),
                    None => None,
                };
                let result = run_task(detector.as_ref(), observer.as_ref(), key).await;
                // Only fails if the collector is gone, and then nobody wants the result.
                let _ = tx.send((index, result)).await;
            });
        }

        // The collector must not hold a sender, or a dead task would leave recv() pending forever.
        drop(tx);

        let mut slots: Vec<Option<EnrichmentResult>> = (0..total).map(|_| None).collect();
        let mut received = 0;
        while received < total {
            match rx.recv().await {
                Some((index, result)) => {
                    debug!(index, key = %result.key, received = received + 1, total, "collected enrichment result");
                    slots[index] = Some(result);
                    received += 1;
                }
                // Every sender is gone: the missing tasks died before reporting.
                None => break,
            }
        }
        rx.close();

        let results: Vec<EnrichmentResult> = slots
            .into_iter()
            .zip(identifiers)
            .map(|(slot, key)| {
                slot.unwrap_or_else(|| {
                    self.observer.on_task_aborted(&key);
                    EnrichmentResult::aborted(key)
                })
            })
            .collect();

        let summary = summarize(&results, started);
        self.observer.on_batch_complete(&summary);
        results
    }
}

fn summarize(results: &[EnrichmentResult], started: Instant) -> BatchSummary {
    let mut summary = BatchSummary {
        total: results.len(),
        elapsed: started.elapsed(),
        ..Default::default()
    };
    for result in results {
        match result.failure_kind() {
            None => summary.succeeded += 1,
            Some(FailureKind::TaskAborted) => summary.aborted += 1,
            Some(FailureKind::Detection(_)) => summary.failed += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use picmark_labels::{BoundingBox, DetectedLabel, DetectionError, FixtureLabelDetector, LabelSet};

    fn engine(detector: FixtureLabelDetector) -> EnrichmentEngine {
        EnrichmentEngine::new(Arc::new(detector))
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = engine(FixtureLabelDetector::new()).enrich(vec![]).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_one_result_per_key_in_order() {
        let detector = FixtureLabelDetector::new()
            .with_labels(
                "a.jpg",
                LabelSet::new(vec![DetectedLabel::with_boxes(
                    "Dog",
                    [BoundingBox { left: 0.1, top: 0.2, width: 0.3, height: 0.4 }],
                )]),
            )
            .with_error("b.jpg", DetectionError::RateLimited("Rate exceeded".into()));

        let keys = vec!["a.jpg".to_string(), "b.jpg".to_string(), "a.jpg".to_string()];
        let results = engine(detector).enrich(keys).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].key, "a.jpg");
        assert_eq!(results[0].values[0].title, "Dog");
        assert_eq!(results[1].key, "b.jpg");
        assert!(results[1].values.is_empty());
        assert!(results[1].is_failed());
        assert_eq!(results[2], results[0]);
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            EnrichmentResult::new("a", vec![]),
            EnrichmentResult::failed("b", &DetectionError::AccessDenied("no".into())),
            EnrichmentResult::aborted("c"),
        ];
        let summary = summarize(&results, Instant::now());
        assert_eq!((summary.total, summary.succeeded, summary.failed, summary.aborted), (3, 1, 1, 1));
    }

    #[tokio::test]
    async fn test_cap_above_semaphore_limit() {
        let detector = FixtureLabelDetector::new().with_labels("a.jpg", LabelSet::default());
        let engine = EnrichmentEngine::with_options(Arc::new(detector), EngineOptions::bounded(usize::MAX));

        let results = engine.enrich(vec!["a.jpg".to_string(), "b.jpg".to_string()]).await;

        assert_eq!(results.len(), 2);
        assert!(!results[0].is_failed());
        assert!(results[1].is_failed());
    }

    #[test]
    fn test_bounded_options() {
        assert_eq!(EngineOptions::bounded(4).max_concurrency, Some(4));
        assert_eq!(EngineOptions::default().max_concurrency, None);
    }
}

//! Diagnostics sink for enrichment batches.
//!
//! Failures never abort a batch, so this is where they become visible. The
//! default [`TracingObserver`] emits `tracing` events; tests and embedders can
//! supply their own implementation.
use std::time::Duration;

use picmark_labels::DetectionError;
use tracing::{info, warn};

/// Counts for one finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub aborted: usize,
    pub elapsed: Duration,
}

pub trait EnrichmentObserver: Send + Sync {
    /// Called from inside the task whose detection call failed.
    fn on_detection_failed(&self, _key: &str, _error: &DetectionError) {}

    /// Called by the collector for a slot whose task never reported.
    fn on_task_aborted(&self, _key: &str) {}

    fn on_batch_complete(&self, _summary: &BatchSummary) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EnrichmentObserver for TracingObserver {
    fn on_detection_failed(&self, key: &str, error: &DetectionError) {
        let kind = error.kind();
        if kind.is_throttling() {
            warn!(key, kind = %kind, error = %error, "label detection throttled; returning empty labels");
        } else {
            warn!(key, kind = %kind, error = %error, "label detection failed; returning empty labels");
        }
    }

    fn on_task_aborted(&self, key: &str) {
        warn!(key, "enrichment task aborted before reporting");
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            aborted = summary.aborted,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "enrichment batch complete"
        );
    }
}

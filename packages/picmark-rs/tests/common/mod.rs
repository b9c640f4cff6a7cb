//! Shared test detectors and observers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use picmark_rs::prelude::*;

#[derive(Clone)]
enum Outcome {
    Labels(LabelSet),
    Fail(DetectionError),
    Panic,
}

struct Step {
    delay: Duration,
    outcome: Outcome,
}

/// Detector with per-key latency and outcome that records how it was driven.
///
/// Keys without a script answer immediately with no labels.
#[derive(Default)]
pub struct ScriptedDetector {
    steps: HashMap<String, Step>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    call_log: Mutex<Vec<String>>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(mut self, key: &str, delay: Duration, labels: LabelSet) -> Self {
        self.steps.insert(key.to_string(), Step { delay, outcome: Outcome::Labels(labels) });
        self
    }

    pub fn fail(mut self, key: &str, delay: Duration, error: DetectionError) -> Self {
        self.steps.insert(key.to_string(), Step { delay, outcome: Outcome::Fail(error) });
        self
    }

    pub fn panic_on(mut self, key: &str) -> Self {
        self.steps.insert(
            key.to_string(),
            Step { delay: Duration::ZERO, outcome: Outcome::Panic },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelDetector for ScriptedDetector {
    async fn detect_labels(&self, key: &str) -> Result<LabelSet, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_log.lock().unwrap().push(key.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let (delay, outcome) = match self.steps.get(key) {
            Some(step) => (step.delay, step.outcome.clone()),
            None => (Duration::ZERO, Outcome::Labels(LabelSet::default())),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match outcome {
            Outcome::Labels(set) => Ok(set),
            Outcome::Fail(error) => Err(error),
            Outcome::Panic => panic!("scripted detector panic for {key}"),
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub failures: Mutex<Vec<(String, DetectionErrorKind)>>,
    pub aborted: Mutex<Vec<String>>,
    pub summaries: Mutex<Vec<BatchSummary>>,
}

impl EnrichmentObserver for RecordingObserver {
    fn on_detection_failed(&self, key: &str, error: &DetectionError) {
        self.failures.lock().unwrap().push((key.to_string(), error.kind()));
    }

    fn on_task_aborted(&self, key: &str) {
        self.aborted.lock().unwrap().push(key.to_string());
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        self.summaries.lock().unwrap().push(*summary);
    }
}

pub fn bbox(left: f64, top: f64, width: f64, height: f64) -> BoundingBox {
    BoundingBox { left, top, width, height }
}

/// A label set with one localized label titled `title`.
pub fn single_label(title: &str) -> LabelSet {
    LabelSet::new(vec![DetectedLabel::with_boxes(title, [bbox(0.1, 0.2, 0.3, 0.4)])])
}

pub fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("img-{i:03}.jpg")).collect()
}

/// Deterministic pseudo-random delays in `0..max_ms`.
pub fn scattered_delays(n: usize, max_ms: u64, seed: u64) -> Vec<Duration> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            Duration::from_millis((state >> 33) % max_ms)
        })
        .collect()
}

//! # picmark-rs
//!
//! Concurrent label enrichment for batches of images. Each image key in a batch
//! is sent to a label detection service on its own task; the engine collects
//! exactly one result per key and hands them back in input order.
//!
//! ## Features
//!
//! - **Fan-out/fan-in engine**: one task per key, optional concurrency cap, results in input order
//! - **Never aborts a batch**: failed lookups degrade to empty labels with the classified error attached
//! - **Pluggable detectors**: HTTP DetectLabels client, JSON fixtures, or any [`LabelDetector`]
//! - **Observable**: failures and batch summaries go through an injectable [`EnrichmentObserver`]
//! - **Request handler**: method routing, CORS headers and JSON encoding around a batch
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use picmark_rs::prelude::*;
//!
//! let detector = HttpLabelDetector::new(DetectorConfig::new("http://localhost:4566/", "photos"))?;
//! let engine = EnrichmentEngine::with_options(Arc::new(detector), EngineOptions::bounded(16));
//!
//! let results = engine.enrich(vec!["a.jpg".into(), "b.jpg".into()]).await;
//! println!("{}", serde_json::to_string(&results)?);
//! ```

pub mod cli;
pub mod config;
pub mod enrichment_engine;
pub mod enrichment_task;
pub mod observer;
pub mod request_handler;
pub mod result;

// Re-export commonly used types at the root level
pub use enrichment_engine::{EngineOptions, EnrichmentEngine};
pub use enrichment_task::{enrich_one, labels_from};
pub use observer::{BatchSummary, EnrichmentObserver, TracingObserver};
pub use picmark_labels::{
    BoundingBox, DetectedLabel, DetectionError, DetectionErrorKind, DetectorConfig, FixtureLabelDetector,
    HttpLabelDetector, LabelDetector, LabelInstance, LabelSet,
};
pub use request_handler::{handle_request, HandlerRequest, HandlerResponse};
pub use result::{EnrichmentFailure, EnrichmentResult, FailureKind, Label, Location};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use picmark_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        enrich_one, handle_request, labels_from, BatchSummary, BoundingBox, DetectedLabel, DetectionError,
        DetectionErrorKind, DetectorConfig, EngineOptions, EnrichmentEngine, EnrichmentFailure,
        EnrichmentObserver, EnrichmentResult, FailureKind, FixtureLabelDetector, HandlerRequest,
        HandlerResponse, HttpLabelDetector, Label, LabelDetector, LabelInstance, LabelSet, Location,
        TracingObserver,
    };
}

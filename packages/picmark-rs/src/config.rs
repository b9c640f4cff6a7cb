//! Resolves command line and environment settings into engine and detector configuration.
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use picmark_labels::{DetectorConfig, FixtureLabelDetector, HttpLabelDetector, LabelDetector};
use thiserror::Error;

use crate::cli::EnrichArgs;
use crate::enrichment_engine::EngineOptions;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no bucket configured; pass --bucket or set BUCKET_NAME")]
    MissingBucket,
    #[error("no endpoint configured; pass --endpoint or set PICMARK_ENDPOINT (requests are unsigned, use a signing proxy)")]
    MissingEndpoint,
    #[error("endpoint must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
    #[error("max concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("min confidence must be between 0 and 100, got {0}")]
    InvalidConfidence(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetectorSource {
    Http(DetectorConfig),
    Fixture(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: DetectorSource,
    pub engine: EngineOptions,
}

impl Settings {
    pub fn from_args(args: &EnrichArgs) -> Result<Self, ConfigError> {
        let engine = match args.max_concurrency {
            Some(0) => return Err(ConfigError::ZeroConcurrency),
            max_concurrency => EngineOptions { max_concurrency },
        };

        if !(0.0..=100.0).contains(&args.min_confidence) {
            return Err(ConfigError::InvalidConfidence(args.min_confidence));
        }

        let source = match &args.fixtures {
            Some(path) => DetectorSource::Fixture(path.clone()),
            None => {
                let bucket = args
                    .bucket
                    .as_deref()
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .ok_or(ConfigError::MissingBucket)?;

                let endpoint = args
                    .endpoint
                    .as_deref()
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .ok_or(ConfigError::MissingEndpoint)?;
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
                }

                DetectorSource::Http(DetectorConfig {
                    endpoint: endpoint.to_string(),
                    bucket: bucket.to_string(),
                    max_labels: args.max_labels,
                    min_confidence: args.min_confidence,
                    timeout: Duration::from_secs(args.timeout_secs),
                })
            }
        };

        Ok(Self { source, engine })
    }

    pub fn build_detector(&self) -> Result<Arc<dyn LabelDetector>> {
        match &self.source {
            DetectorSource::Http(config) => {
                let detector = HttpLabelDetector::new(config.clone())
                    .context("Failed to initialize HTTP label detector")?;
                Ok(Arc::new(detector))
            }
            DetectorSource::Fixture(path) => {
                let detector = FixtureLabelDetector::from_path(path)
                    .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
                Ok(Arc::new(detector))
            }
        }
    }
}

//! Offline detector answering from a JSON document instead of a remote service.
//!
//! The document maps each image key to either a DetectLabels response body or an
//! error record:
//!
//! ```json
//! {
//!   "a.jpg": {"Labels": [{"Name": "Dog", "Instances": [{"BoundingBox": {"Left": 0.1, "Top": 0.2, "Width": 0.3, "Height": 0.4}}]}]},
//!   "b.jpg": {"Error": {"Code": "ThrottlingException", "Message": "Rate exceeded"}}
//! }
//! ```
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::detector::{DetectionError, LabelDetector};
use crate::region::LabelSet;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FixtureEntry {
    Failure {
        #[serde(rename = "Error")]
        error: FixtureFailure,
    },
    Labels(LabelSet),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FixtureFailure {
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Clone)]
pub struct FixtureLabelDetector {
    entries: HashMap<String, Result<LabelSet, DetectionError>>,
}

impl FixtureLabelDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let raw: HashMap<String, FixtureEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(key, entry)| {
                let outcome = match entry {
                    FixtureEntry::Labels(set) => Ok(set),
                    FixtureEntry::Failure { error } => {
                        Err(DetectionError::from_service_code(&error.code, error.message))
                    }
                };
                (key, outcome)
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn with_labels(mut self, key: impl Into<String>, labels: LabelSet) -> Self {
        self.entries.insert(key.into(), Ok(labels));
        self
    }

    pub fn with_error(mut self, key: impl Into<String>, error: DetectionError) -> Self {
        self.entries.insert(key.into(), Err(error));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl LabelDetector for FixtureLabelDetector {
    async fn detect_labels(&self, key: &str) -> Result<LabelSet, DetectionError> {
        match self.entries.get(key) {
            Some(outcome) => outcome.clone(),
            None => Err(DetectionError::InvalidReference(format!(
                "no fixture for image {key}"
            ))),
        }
    }
}

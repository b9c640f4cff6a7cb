use std::time::Duration;

/// Settings for a label detection client.
///
/// The bucket is always supplied by the caller; clients never read it from the
/// process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// DetectLabels endpoint. Requests go out unsigned, so this must be a
    /// signing proxy or a service that accepts unsigned calls.
    pub endpoint: String,
    pub bucket: String,
    pub max_labels: u32,
    pub min_confidence: f64,
    pub timeout: Duration,
}

impl DetectorConfig {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            ..Default::default()
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            bucket: String::new(),
            max_labels: 10,
            min_confidence: 90.0,
            timeout: Duration::from_secs(30),
        }
    }
}

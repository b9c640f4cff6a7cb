use async_trait::async_trait;
use reqwest::header;
use tracing::debug;

use crate::config::DetectorConfig;
use crate::detector::{DetectionError, LabelDetector};
use crate::region::LabelSet;

use super::wire;

/// Calls DetectLabels over its JSON protocol for objects in one bucket.
pub struct HttpLabelDetector {
    client: reqwest::Client,
    config: DetectorConfig,
}

impl HttpLabelDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DetectionError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: DetectorConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

#[async_trait]
impl LabelDetector for HttpLabelDetector {
    async fn detect_labels(&self, key: &str) -> Result<LabelSet, DetectionError> {
        let request = wire::DetectLabelsRequest::new(
            &self.config.bucket,
            key,
            self.config.max_labels,
            self.config.min_confidence,
        );
        let body = serde_json::to_vec(&request).map_err(|e| DetectionError::Transport(e.to_string()))?;

        debug!(key, bucket = %self.config.bucket, endpoint = %self.config.endpoint, "calling DetectLabels");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(header::CONTENT_TYPE, wire::CONTENT_TYPE)
            .header("X-Amz-Target", wire::TARGET)
            .body(body)
            .send()
            .await
            .map_err(|e| DetectionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let error_type = response
            .headers()
            .get(wire::ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response
            .text()
            .await
            .map_err(|e| DetectionError::Transport(e.to_string()))?;

        debug!(key, status, "completed DetectLabels");
        wire::parse_response(status, error_type.as_deref(), &text)
    }
}

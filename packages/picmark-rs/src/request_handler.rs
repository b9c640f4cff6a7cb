//! Maps a method and body to a response around one enrichment batch.
//!
//! Transport-agnostic: callers adapt their own request type into a
//! [`HandlerRequest`] and write the [`HandlerResponse`] back out.
use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::enrichment_engine::EnrichmentEngine;

pub const INVALID_REQUEST_BODY: &str = "invalid request";
pub const INTERNAL_ERROR_BODY: &str = "internal error";

const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type,X-Amz-Date,Authorization"),
    ("Access-Control-Allow-Methods", "DELETE,GET,OPTIONS,POST,PUT"),
    ("Cache-Control", "private, no-cache, no-store, max-age=0, must-revalidate"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRequest {
    pub method: String,
    pub body: String,
}

impl HandlerRequest {
    pub fn new(method: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    fn with_cors(status: u16, body: String) -> Self {
        Self {
            status,
            headers: cors_headers(),
            body,
        }
    }

    fn plain(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.to_string(),
        }
    }
}

pub fn cors_headers() -> BTreeMap<String, String> {
    CORS_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Decodes the request body as a JSON array of image keys.
///
/// A body that is not such an array yields an empty batch rather than an error.
pub fn parse_batch(body: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(body) {
        Ok(keys) => keys,
        Err(e) => {
            warn!(error = %e, "request body is not a JSON array of strings; treating as empty batch");
            Vec::new()
        }
    }
}

pub async fn handle_request(engine: &EnrichmentEngine, request: &HandlerRequest) -> HandlerResponse {
    match request.method.as_str() {
        "OPTIONS" => HandlerResponse::with_cors(200, String::new()),
        "POST" => {
            let keys = parse_batch(&request.body);
            debug!(count = keys.len(), "decoded enrichment batch");

            let results = engine.enrich(keys).await;
            match serde_json::to_string(&results) {
                Ok(body) => HandlerResponse::with_cors(200, body),
                Err(e) => {
                    error!(error = %e, "failed to encode enrichment results");
                    HandlerResponse::plain(500, INTERNAL_ERROR_BODY)
                }
            }
        }
        other => {
            debug!(method = other, "rejecting unsupported method");
            HandlerResponse::plain(400, INVALID_REQUEST_BODY)
        }
    }
}

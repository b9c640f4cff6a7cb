//! Integration tests for the request handler boundary

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{single_label, ScriptedDetector};
use picmark_rs::prelude::*;
use picmark_rs::request_handler::{cors_headers, INVALID_REQUEST_BODY};

fn engine_with(detector: Arc<ScriptedDetector>) -> EnrichmentEngine {
    EnrichmentEngine::new(detector)
}

#[tokio::test]
async fn test_options_returns_cors_preflight() {
    let detector = Arc::new(ScriptedDetector::new());
    let engine = engine_with(detector.clone());

    let response = handle_request(&engine, &HandlerRequest::new("OPTIONS", "")).await;

    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());
    assert_eq!(response.headers, cors_headers());
    assert_eq!(detector.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_post_enriches_batch() {
    let detector = Arc::new(
        ScriptedDetector::new()
            .labels("a.jpg", Duration::from_millis(10), single_label("Dog"))
            .fail("b.jpg", Duration::ZERO, DetectionError::RateLimited("Rate exceeded".into())),
    );
    let engine = engine_with(detector);

    let response = handle_request(&engine, &HandlerRequest::new("POST", r#"["a.jpg","b.jpg"]"#)).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        response.headers["Cache-Control"],
        "private, no-cache, no-store, max-age=0, must-revalidate"
    );

    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body[0]["Key"], "a.jpg");
    assert_eq!(body[0]["Values"][0]["Title"], "Dog");
    assert_eq!(body[1]["Key"], "b.jpg");
    assert_eq!(body[1]["Values"], serde_json::json!([]));
    assert_eq!(body[1]["Error"]["Kind"], "RateLimited");
}

#[tokio::test]
async fn test_post_with_empty_array() {
    let detector = Arc::new(ScriptedDetector::new());
    let engine = engine_with(detector.clone());

    let response = handle_request(&engine, &HandlerRequest::new("POST", "[]")).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_post_with_unparsable_body_is_empty_batch() {
    let detector = Arc::new(ScriptedDetector::new());
    let engine = engine_with(detector.clone());

    let response = handle_request(&engine, &HandlerRequest::new("POST", "not json")).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    let engine = engine_with(Arc::new(ScriptedDetector::new()));

    for method in ["GET", "PUT", "DELETE", "post"] {
        let response = handle_request(&engine, &HandlerRequest::new(method, r#"["a.jpg"]"#)).await;
        assert_eq!(response.status, 400, "{method}");
        assert_eq!(response.body, INVALID_REQUEST_BODY);
        assert!(response.headers.is_empty());
    }
}

use std::sync::Arc;

use anyhow::Result;
use picmark_rs::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Canned responses stand in for the label service
    let detector = FixtureLabelDetector::from_json(
        r#"{
            "park.jpg": {"Labels": [
                {"Name": "Dog", "Instances": [
                    {"BoundingBox": {"Left": 0.12, "Top": 0.40, "Width": 0.25, "Height": 0.30}},
                    {"BoundingBox": {"Left": 0.60, "Top": 0.45, "Width": 0.20, "Height": 0.28}}
                ]},
                {"Name": "Grass", "Instances": []}
            ]},
            "street.jpg": {"Error": {"Code": "ThrottlingException", "Message": "Rate exceeded"}}
        }"#,
    )?;

    let engine = EnrichmentEngine::with_options(Arc::new(detector), EngineOptions::bounded(2));
    let batch = vec!["park.jpg".to_string(), "street.jpg".to_string(), "unknown.jpg".to_string()];

    println!("Enriching {} images", batch.len());
    println!("{}", "=".repeat(60));

    for result in engine.enrich(batch).await {
        match &result.error {
            Some(failure) => println!("{}: failed ({}) {}", result.key, failure.kind.as_str(), failure.message),
            None => {
                println!("{}: {} localized labels", result.key, result.values.len());
                for label in &result.values {
                    println!("   {} x{}", label.title, label.locations.len());
                }
            }
        }
    }

    Ok(())
}

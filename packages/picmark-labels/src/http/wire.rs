use serde::{Deserialize, Serialize};

use crate::detector::DetectionError;
use crate::region::LabelSet;

pub(crate) const TARGET: &str = "RekognitionService.DetectLabels";
pub(crate) const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
pub(crate) const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectLabelsRequest<'a> {
    image: ImageRef<'a>,
    max_labels: u32,
    min_confidence: f64,
}

#[derive(Debug, Serialize)]
struct ImageRef<'a> {
    #[serde(rename = "S3Object")]
    s3_object: S3Object<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct S3Object<'a> {
    bucket: &'a str,
    name: &'a str,
}

impl<'a> DetectLabelsRequest<'a> {
    pub(crate) fn new(bucket: &'a str, name: &'a str, max_labels: u32, min_confidence: f64) -> Self {
        Self {
            image: ImageRef {
                s3_object: S3Object { bucket, name },
            },
            max_labels,
            min_confidence,
        }
    }
}

/// Error body of the JSON protocol. Services disagree on the casing, so all
/// spellings seen in the wild are accepted.
#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    code: Option<String>,
    #[serde(rename = "Code")]
    code_upper: Option<String>,
    message: Option<String>,
    #[serde(rename = "Message")]
    message_upper: Option<String>,
}

/// Turns a raw HTTP outcome into a label set or a classified error.
pub(crate) fn parse_response(
    status: u16,
    error_type_header: Option<&str>,
    body: &str,
) -> Result<LabelSet, DetectionError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body)
            .map_err(|e| DetectionError::Transport(format!("malformed DetectLabels response: {e}")));
    }

    let parsed: ServiceErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.message_upper)
        .unwrap_or_else(|| body.trim().to_string());
    let code = parsed
        .error_type
        .or(parsed.code)
        .or(parsed.code_upper)
        .or_else(|| error_type_header.map(str::to_string));

    match code {
        Some(code) => Err(DetectionError::from_service_code(&code, message)),
        None => Err(classify_status(status, message)),
    }
}

fn classify_status(status: u16, message: String) -> DetectionError {
    match status {
        403 => DetectionError::AccessDenied(message),
        413 => DetectionError::PayloadTooLarge(message),
        429 => DetectionError::RateLimited(message),
        500..=599 => DetectionError::InternalFault(message),
        _ => DetectionError::Unclassified {
            code: format!("HTTP {status}"),
            message,
        },
    }
}

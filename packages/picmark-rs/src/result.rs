//! Result shapes returned by the enrichment engine and their JSON encoding.
use picmark_labels::{BoundingBox, DetectionError, DetectionErrorKind};
use serde::{Serialize, Serializer};

/// One localized instance of a label.
///
/// Field order follows the response format consumers already parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub left: f64,
    pub top: f64,
    pub height: f64,
    pub width: f64,
}

impl From<&BoundingBox> for Location {
    fn from(b: &BoundingBox) -> Self {
        Self {
            left: b.left,
            top: b.top,
            height: b.height,
            width: b.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    pub title: String,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The label service call failed.
    Detection(DetectionErrorKind),
    /// The task ended without reporting a result.
    TaskAborted,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detection(kind) => kind.as_str(),
            Self::TaskAborted => "TaskAborted",
        }
    }
}

impl Serialize for FailureKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichmentFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Labels found for one image key.
///
/// `values` keeps the order the label service returned. `error` is set when
/// the detection call failed, which tells a failed lookup apart from an image
/// with no localized labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichmentResult {
    pub key: String,
    pub values: Vec<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EnrichmentFailure>,
}

impl EnrichmentResult {
    pub fn new(key: impl Into<String>, values: Vec<Label>) -> Self {
        Self {
            key: key.into(),
            values,
            error: None,
        }
    }

    pub fn failed(key: impl Into<String>, error: &DetectionError) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
            error: Some(EnrichmentFailure {
                kind: FailureKind::Detection(error.kind()),
                message: error.to_string(),
            }),
        }
    }

    pub fn aborted(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
            error: Some(EnrichmentFailure {
                kind: FailureKind::TaskAborted,
                message: "enrichment task ended without reporting a result".to_string(),
            }),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

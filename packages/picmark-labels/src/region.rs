use serde::{Deserialize, Serialize};

/// Normalized rectangle, each field a fraction of the image dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelInstance {
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A single concept reported by the detection service.
///
/// `instances` is `None` when the service did not localize the concept at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectedLabel {
    pub name: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub instances: Option<Vec<LabelInstance>>,
}

impl DetectedLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confidence: None,
            instances: None,
        }
    }

    pub fn with_boxes(name: impl Into<String>, boxes: impl IntoIterator<Item = BoundingBox>) -> Self {
        Self {
            name: name.into(),
            confidence: None,
            instances: Some(
                boxes
                    .into_iter()
                    .map(|b| LabelInstance {
                        bounding_box: Some(b),
                        confidence: None,
                    })
                    .collect(),
            ),
        }
    }

    /// Bounding boxes of the localized instances, in service order.
    pub fn boxes(&self) -> impl Iterator<Item = &BoundingBox> {
        self.instances
            .iter()
            .flatten()
            .filter_map(|i| i.bounding_box.as_ref())
    }

    /// True when at least one instance carries a bounding box.
    pub fn is_localized(&self) -> bool {
        self.boxes().next().is_some()
    }
}

/// Body of a successful DetectLabels call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelSet {
    #[serde(default)]
    pub labels: Vec<DetectedLabel>,
}

impl LabelSet {
    pub fn new(labels: Vec<DetectedLabel>) -> Self {
        Self { labels }
    }
}

pub mod config;
pub mod detector;
pub mod fixture;
pub mod http;
pub mod region;

pub use config::DetectorConfig;
pub use detector::{DetectionError, DetectionErrorKind, LabelDetector};
pub use fixture::{FixtureError, FixtureLabelDetector};
pub use http::HttpLabelDetector;
pub use region::{BoundingBox, DetectedLabel, LabelInstance, LabelSet};

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::region::LabelSet;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    #[error("invalid image reference: {0}")]
    InvalidReference(String),
    #[error("malformed request parameters: {0}")]
    MalformedParameters(String),
    #[error("image too large: {0}")]
    PayloadTooLarge(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("service internal error: {0}")]
    InternalFault(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("provisioned throughput exceeded: {0}")]
    ThroughputExceeded(String),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("{code}: {message}")]
    Unclassified { code: String, message: String },
    #[error("transport error: {0}")]
    Transport(String),
}

/// Classification of a [`DetectionError`], without the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionErrorKind {
    InvalidReference,
    MalformedParameters,
    PayloadTooLarge,
    AccessDenied,
    InternalFault,
    RateLimited,
    ThroughputExceeded,
    UnsupportedFormat,
    Unclassified,
    Transport,
}

impl DetectionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidReference => "InvalidReference",
            Self::MalformedParameters => "MalformedParameters",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::AccessDenied => "AccessDenied",
            Self::InternalFault => "InternalFault",
            Self::RateLimited => "RateLimited",
            Self::ThroughputExceeded => "ThroughputExceeded",
            Self::UnsupportedFormat => "UnsupportedFormat",
            Self::Unclassified => "Unclassified",
            Self::Transport => "Transport",
        }
    }

    /// Backpressure from the service rather than a problem with the request.
    pub fn is_throttling(&self) -> bool {
        matches!(self, Self::RateLimited | Self::ThroughputExceeded)
    }
}

impl fmt::Display for DetectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DetectionError {
    /// Maps a DetectLabels error code to its classified error.
    ///
    /// Accepts bare codes (`ThrottlingException`), namespaced `__type` values
    /// (`com.amazonaws.rekognition#ThrottlingException`) and `x-amzn-errortype`
    /// header values (`ThrottlingException:http://...`).
    pub fn from_service_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let bare = code.rsplit('#').next().unwrap_or(code);
        let bare = bare.split(':').next().unwrap_or(bare).trim();

        match bare {
            "InvalidS3ObjectException" => Self::InvalidReference(message),
            "InvalidParameterException" => Self::MalformedParameters(message),
            "ImageTooLargeException" => Self::PayloadTooLarge(message),
            "AccessDeniedException" => Self::AccessDenied(message),
            "InternalServerError" => Self::InternalFault(message),
            "ThrottlingException" => Self::RateLimited(message),
            "ProvisionedThroughputExceededException" => Self::ThroughputExceeded(message),
            "InvalidImageFormatException" => Self::UnsupportedFormat(message),
            _ => Self::Unclassified {
                code: bare.to_string(),
                message,
            },
        }
    }

    pub fn kind(&self) -> DetectionErrorKind {
        match self {
            Self::InvalidReference(_) => DetectionErrorKind::InvalidReference,
            Self::MalformedParameters(_) => DetectionErrorKind::MalformedParameters,
            Self::PayloadTooLarge(_) => DetectionErrorKind::PayloadTooLarge,
            Self::AccessDenied(_) => DetectionErrorKind::AccessDenied,
            Self::InternalFault(_) => DetectionErrorKind::InternalFault,
            Self::RateLimited(_) => DetectionErrorKind::RateLimited,
            Self::ThroughputExceeded(_) => DetectionErrorKind::ThroughputExceeded,
            Self::UnsupportedFormat(_) => DetectionErrorKind::UnsupportedFormat,
            Self::Unclassified { .. } => DetectionErrorKind::Unclassified,
            Self::Transport(_) => DetectionErrorKind::Transport,
        }
    }
}

/// A label detection backend.
///
/// Implementations perform exactly one remote call per invocation and never retry.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn detect_labels(&self, key: &str) -> Result<LabelSet, DetectionError>;
}

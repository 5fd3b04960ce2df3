//! Error types for buffer construction, analysis, and decoding.

/// Convenience alias used by every analyzer.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Precondition failures reported by the analyzers.
///
/// Analyzers validate eagerly and return one of these instead of producing
/// `NaN` or a partially computed descriptor.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("image has zero area")]
    EmptyImage,
    #[error("unsupported channel count {found} (supported: {supported:?})")]
    UnsupportedChannelCount {
        found: usize,
        supported: &'static [usize],
    },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    #[error("pixel data has {found} samples, expected {expected}")]
    BufferSizeMismatch { expected: usize, found: usize },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning an encoded image into a [`PixelBuffer`].
///
/// [`PixelBuffer`]: crate::image::PixelBuffer
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode image: {0}")]
    Open(#[from] ::image::ImageError),
    #[error("decoded image is unusable: {0}")]
    Buffer(#[from] AnalysisError),
}

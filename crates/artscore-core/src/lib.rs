//! Artscore Core — color feature extraction and scoring for artwork images.
//!
//! Every analyzer is a pure function over an immutable [`PixelBuffer`]:
//! warmth, saturation and brightness scores, colorfulness, dominant colors,
//! channel variance, unique-color count, grayscale share, and Sobel-based
//! gradient and texture metrics. No global state; decoding lives behind the
//! [`decode`] adapter.

pub mod analysis;
pub mod color;
pub mod config;
pub mod decode;
pub mod error;
pub mod features;
pub mod filter;
pub mod image;
pub mod parallel;
pub mod stats;

// Re-exports for convenience.
pub use analysis::{
    ChannelVariance, ColorHistogram, DominantColor, GradientSummary, ScoreTarget,
    brightness_score, channel_variance, color_histogram, color_texture, colorfulness,
    dominant_colors, gaussian_score, gradient_magnitude_mean, gradient_summary, mean_brightness,
    mean_saturation, percent_colored, saturation_score, unique_color_count, warmth_score,
};
pub use color::{Hsv, rgb_to_hsv};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, DecodeError, Result};
pub use features::{ImageFeatures, extract_features};
pub use filter::{Kernel3, Plane, convolve_2d};
pub use crate::image::{ChannelLayout, PixelBuffer, Rgb};

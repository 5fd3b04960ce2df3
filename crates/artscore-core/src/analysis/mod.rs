//! Image analyzers. Each reduces a [`PixelBuffer`] to a scalar or a small
//! descriptor and is independent of the others.
//!
//! [`PixelBuffer`]: crate::image::PixelBuffer

pub mod dominant;
pub mod gradient;
pub mod scoring;
pub mod statistics;

pub use dominant::{ColorHistogram, DominantColor, color_histogram, dominant_colors};
pub use gradient::{GradientSummary, color_texture, gradient_magnitude_mean, gradient_summary};
pub use scoring::{
    ScoreTarget, brightness_score, gaussian_score, mean_brightness, mean_saturation,
    saturation_score,
};
pub use statistics::{
    ChannelVariance, channel_variance, colorfulness, percent_colored, unique_color_count,
    warmth_score,
};

//! One-call extraction of every color feature for an image.

use serde::{Deserialize, Serialize};

use crate::analysis::dominant::{DominantColor, dominant_colors};
use crate::analysis::gradient::gradient_summary;
use crate::analysis::scoring::{mean_brightness, mean_saturation};
use crate::analysis::statistics::{
    ChannelVariance, channel_variance, colorfulness, percent_colored, unique_color_count,
    warmth_score,
};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::image::PixelBuffer;

/// Every descriptor produced by the analyzers for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFeatures {
    pub width: u32,
    pub height: u32,
    /// 0 (cool) to 100 (warm).
    pub warmth: f64,
    pub unique_colors: usize,
    /// Share of non-grayscale pixels, 0 to 100.
    pub percent_colored: f64,
    pub mean_saturation: f64,
    pub saturation_score: f64,
    pub mean_brightness: f64,
    pub brightness_score: f64,
    pub colorfulness: f64,
    pub channel_variance: ChannelVariance,
    pub dominant_colors: Vec<DominantColor>,
    pub gradient_magnitude: f64,
    pub color_texture: f64,
}

/// Run every analyzer on `buffer` with the parameters in `config`.
///
/// RGBA input is accepted: the grayscale classification sees alpha, every
/// other analyzer sees the buffer with alpha dropped.
pub fn extract_features(buffer: &PixelBuffer, config: &AnalysisConfig) -> Result<ImageFeatures> {
    config.validate()?;
    buffer.require_non_empty()?;

    let percent_colored = percent_colored(buffer, config.tolerance)?;
    let rgb = buffer.to_rgb();

    let mean_saturation = mean_saturation(&rgb)?;
    let mean_brightness = mean_brightness(&rgb)?;
    let gradient = gradient_summary(&rgb)?;

    let features = ImageFeatures {
        width: rgb.width(),
        height: rgb.height(),
        warmth: warmth_score(&rgb)?,
        unique_colors: unique_color_count(&rgb)?,
        percent_colored,
        mean_saturation,
        saturation_score: config.saturation.score(mean_saturation)?,
        mean_brightness,
        brightness_score: config.brightness.score(mean_brightness)?,
        colorfulness: colorfulness(&rgb)?,
        channel_variance: channel_variance(&rgb)?,
        dominant_colors: dominant_colors(&rgb, config.num_dominant_colors)?,
        gradient_magnitude: gradient.mean_magnitude,
        color_texture: gradient.texture,
    };
    tracing::debug!(
        width = features.width,
        height = features.height,
        "extracted image features"
    );
    Ok(features)
}

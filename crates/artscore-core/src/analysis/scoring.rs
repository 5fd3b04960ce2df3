//! Gaussian "closeness to target" scoring and the saturation/brightness
//! scores built on it.

use serde::{Deserialize, Serialize};

use crate::color::hsv::rgb8_to_hsv;
use crate::error::{AnalysisError, Result};
use crate::image::PixelBuffer;
use crate::parallel;
use crate::stats::Moments;

/// Target and tolerance for a Gaussian score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTarget {
    /// Observed value that scores exactly 100.
    pub target: f64,
    /// Width of the bell. Must be positive; larger is more lenient.
    pub std_dev: f64,
}

impl ScoreTarget {
    /// Default target for mean HSV saturation.
    pub const SATURATION: Self = Self::new(0.6, 0.25);
    /// Default target for mean HSV value.
    pub const BRIGHTNESS: Self = Self::new(0.65, 0.25);

    pub const fn new(target: f64, std_dev: f64) -> Self {
        Self { target, std_dev }
    }

    /// Check that this target yields a defined score.
    pub fn validate(&self) -> Result<()> {
        if !self.target.is_finite() {
            return Err(AnalysisError::invalid(
                "target",
                format!("{} is not finite", self.target),
            ));
        }
        if !(self.std_dev.is_finite() && self.std_dev > 0.0) {
            return Err(AnalysisError::invalid(
                "std_dev",
                format!("{} must be a positive finite number", self.std_dev),
            ));
        }
        Ok(())
    }

    /// Score `observed` against this target.
    pub fn score(&self, observed: f64) -> Result<f64> {
        gaussian_score(observed, self.target, self.std_dev)
    }
}

/// Map `observed` to `(0, 100]` by its distance from `target`.
///
/// ```text
/// score = 100 · exp(−(observed − target)² / (2 · std_dev²))
/// ```
///
/// The score is exactly 100 at the target and symmetric around it. Far
/// from the target the result is held at the smallest positive `f64`
/// instead of underflowing to zero.
pub fn gaussian_score(observed: f64, target: f64, std_dev: f64) -> Result<f64> {
    ScoreTarget::new(target, std_dev).validate()?;
    if !observed.is_finite() {
        return Err(AnalysisError::invalid(
            "observed",
            format!("{observed} is not finite"),
        ));
    }

    let delta = observed - target;
    let score = 100.0 * (-(delta * delta) / (2.0 * std_dev * std_dev)).exp();
    Ok(score.max(f64::MIN_POSITIVE))
}

/// Mean HSV saturation over all pixels, in `[0, 1]`.
pub fn mean_saturation(buffer: &PixelBuffer) -> Result<f64> {
    mean_hsv_component(buffer, |r, g, b| rgb8_to_hsv([r, g, b]).saturation)
}

/// Mean HSV value (`max(R, G, B) / 255`) over all pixels, in `[0, 1]`.
pub fn mean_brightness(buffer: &PixelBuffer) -> Result<f64> {
    mean_hsv_component(buffer, |r, g, b| rgb8_to_hsv([r, g, b]).value)
}

/// Score the mean saturation of `buffer` against `target`.
pub fn saturation_score(buffer: &PixelBuffer, target: ScoreTarget) -> Result<f64> {
    target.validate()?;
    let observed = mean_saturation(buffer)?;
    let score = target.score(observed)?;
    tracing::debug!(observed, score, "saturation score");
    Ok(score)
}

/// Score the mean brightness of `buffer` against `target`.
pub fn brightness_score(buffer: &PixelBuffer, target: ScoreTarget) -> Result<f64> {
    target.validate()?;
    let observed = mean_brightness(buffer)?;
    let score = target.score(observed)?;
    tracing::debug!(observed, score, "brightness score");
    Ok(score)
}

fn mean_hsv_component<F>(buffer: &PixelBuffer, component: F) -> Result<f64>
where
    F: Fn(u8, u8, u8) -> f64 + Sync + Send,
{
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let moments = parallel::fold_bands(
        buffer.as_bytes(),
        buffer.width() as usize * 3,
        Moments::new,
        |mut acc, band| {
            for px in band.chunks_exact(3) {
                acc.push(component(px[0], px[1], px[2]));
            }
            acc
        },
        Moments::merge,
    );
    Ok(moments.mean())
}

//! Whole-image color statistics: channel variance, unique colors, warmth,
//! colorfulness, and the grayscale/color split.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::image::{PixelBuffer, Rgb};
use crate::parallel;
use crate::stats::Moments;

/// Default per-channel tolerance for the grayscale classification.
pub const DEFAULT_TOLERANCE: i32 = 10;

/// Largest theoretical magnitude of the per-pixel warmth signal used for
/// normalization.
const WARMTH_NORMALIZER: f64 = 255.0;

/// Weight of the mean term in the Hasler–Süsstrunk metric.
const COLORFULNESS_MEAN_WEIGHT: f64 = 0.3;

/// Population variance of each channel over all pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelVariance {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ChannelVariance {
    /// `[red, green, blue]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Population variance (divisor `N`) of the R, G, and B channels.
///
/// A component is exactly zero iff that channel is constant.
pub fn channel_variance(buffer: &PixelBuffer) -> Result<ChannelVariance> {
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let moments = parallel::fold_bands(
        buffer.as_bytes(),
        buffer.width() as usize * 3,
        || [Moments::new(); 3],
        |mut acc, band| {
            for px in band.chunks_exact(3) {
                for c in 0..3 {
                    acc[c].push(px[c] as f64);
                }
            }
            acc
        },
        |a, b| [a[0].merge(b[0]), a[1].merge(b[1]), a[2].merge(b[2])],
    );

    let variance = ChannelVariance {
        red: moments[0].population_variance(),
        green: moments[1].population_variance(),
        blue: moments[2].population_variance(),
    };
    tracing::debug!(?variance, "channel variance");
    Ok(variance)
}

/// Exact number of distinct RGB triples. Zero-area buffers have zero colors.
pub fn unique_color_count(buffer: &PixelBuffer) -> Result<usize> {
    buffer.require_rgb()?;
    let pixels = buffer.as_rgb_slice().unwrap_or_default();

    let mut seen: HashSet<Rgb> = HashSet::with_capacity(pixels.len().min(1 << 20));
    seen.extend(pixels.iter().copied());

    tracing::debug!(unique = seen.len(), "unique color count");
    Ok(seen.len())
}

/// Warmth score in `[0, 100]`: 0 is coolest, 50 neutral, 100 warmest.
///
/// ```text
/// warmth   = R − (G + B)/2
/// coolness = B − (R + G)/2
/// score    = (clamp(mean(warmth − coolness) / 255, −1, 1) + 1) · 50
/// ```
pub fn warmth_score(buffer: &PixelBuffer) -> Result<f64> {
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let moments = parallel::fold_bands(
        buffer.as_bytes(),
        buffer.width() as usize * 3,
        Moments::new,
        |mut acc, band| {
            for px in band.chunks_exact(3) {
                let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
                let warmth = r - (g + b) / 2.0;
                let coolness = b - (r + g) / 2.0;
                acc.push(warmth - coolness);
            }
            acc
        },
        Moments::merge,
    );

    let normalized = (moments.mean() / WARMTH_NORMALIZER).clamp(-1.0, 1.0);
    let score = (normalized + 1.0) * 50.0;
    tracing::debug!(score, "warmth score");
    Ok(score)
}

/// Hasler–Süsstrunk colorfulness. Unbounded above; 0 for any gray image.
///
/// ```text
/// rg = |R − G|
/// yb = |(R + G)/2 − B|
/// colorfulness = sqrt(σ_rg² + σ_yb²) + 0.3 · sqrt(μ_rg² + μ_yb²)
/// ```
pub fn colorfulness(buffer: &PixelBuffer) -> Result<f64> {
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let [rg, yb] = parallel::fold_bands(
        buffer.as_bytes(),
        buffer.width() as usize * 3,
        || [Moments::new(); 2],
        |mut acc, band| {
            for px in band.chunks_exact(3) {
                let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
                acc[0].push((r - g).abs());
                acc[1].push((0.5 * (r + g) - b).abs());
            }
            acc
        },
        |a, b| [a[0].merge(b[0]), a[1].merge(b[1])],
    );

    let std_root = (rg.population_variance() + yb.population_variance()).sqrt();
    let mean_root = (rg.mean() * rg.mean() + yb.mean() * yb.mean()).sqrt();
    let value = std_root + COLORFULNESS_MEAN_WEIGHT * mean_root;
    tracing::debug!(value, "colorfulness");
    Ok(value)
}

/// Percentage of pixels that are not grayscale, in `[0, 100]`.
///
/// A pixel is grayscale when every pairwise channel difference is at most
/// `tolerance`. For RGBA buffers it must also be opaque within the same
/// tolerance (`alpha >= 255 − tolerance`); translucent gray pixels count as
/// colored.
pub fn percent_colored(buffer: &PixelBuffer, tolerance: i32) -> Result<f64> {
    if !(0..=255).contains(&tolerance) {
        return Err(AnalysisError::invalid(
            "tolerance",
            format!("{tolerance} is outside 0..=255"),
        ));
    }
    buffer.require_non_empty()?;

    let tolerance = tolerance as u8;
    let channels = buffer.channels();
    let grayscale: u64 = parallel::fold_bands(
        buffer.as_bytes(),
        buffer.width() as usize * channels,
        || 0_u64,
        |acc, band| {
            acc + band
                .chunks_exact(channels)
                .filter(|px| is_grayscale(px, tolerance))
                .count() as u64
        },
        |a, b| a + b,
    );

    let total = buffer.pixel_count() as f64;
    let percent = 100.0 * (1.0 - grayscale as f64 / total);
    tracing::debug!(percent, grayscale, tolerance, "percent colored");
    Ok(percent)
}

fn is_grayscale(px: &[u8], tolerance: u8) -> bool {
    let (r, g, b) = (px[0], px[1], px[2]);
    let neutral =
        r.abs_diff(g) <= tolerance && g.abs_diff(b) <= tolerance && r.abs_diff(b) <= tolerance;
    match px.get(3) {
        Some(&alpha) => neutral && alpha >= 255 - tolerance,
        None => neutral,
    }
}

//! Sobel-based edge strength and color texture.
//!
//! Both metrics start from the same per-channel gradient magnitude fields.
//! The mean metric averages each channel's field and then the three means.
//! The texture metric first averages the three fields elementwise into one
//! combined field and reports its population standard deviation, so uniform
//! edges score low even when they are strong.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::convolve::Plane;
use crate::filter::sobel::channel_gradient_fields;
use crate::image::PixelBuffer;
use crate::parallel;
use crate::stats::Moments;

/// Both gradient metrics computed from a single set of gradient fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientSummary {
    /// Mean of the per-channel mean gradient magnitudes.
    pub mean_magnitude: f64,
    /// Population standard deviation of the channel-averaged gradient field.
    pub texture: f64,
}

/// Average Sobel gradient magnitude across the R, G, and B channels.
pub fn gradient_magnitude_mean(buffer: &PixelBuffer) -> Result<f64> {
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let fields = channel_gradient_fields(buffer);
    let value = mean_of_field_means(&fields);
    tracing::debug!(value, "gradient magnitude mean");
    Ok(value)
}

/// Texture irregularity: std of the channel-averaged gradient field.
pub fn color_texture(buffer: &PixelBuffer) -> Result<f64> {
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let fields = channel_gradient_fields(buffer);
    let value = field_moments(&combine_fields(&fields)).population_std();
    tracing::debug!(value, "color texture");
    Ok(value)
}

/// Compute [`gradient_magnitude_mean`] and [`color_texture`] in one pass over
/// the convolutions.
pub fn gradient_summary(buffer: &PixelBuffer) -> Result<GradientSummary> {
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let fields = channel_gradient_fields(buffer);
    let summary = GradientSummary {
        mean_magnitude: mean_of_field_means(&fields),
        texture: field_moments(&combine_fields(&fields)).population_std(),
    };
    tracing::debug!(?summary, "gradient summary");
    Ok(summary)
}

fn mean_of_field_means(fields: &[Plane; 3]) -> f64 {
    fields
        .iter()
        .map(|field| field_moments(field).mean())
        .sum::<f64>()
        / 3.0
}

fn combine_fields(fields: &[Plane; 3]) -> Plane {
    let [r, g, b] = fields;
    let data = r
        .data()
        .iter()
        .zip(g.data())
        .zip(b.data())
        .map(|((&r, &g), &b)| (r + g + b) / 3.0)
        .collect();
    Plane::from_parts(r.width(), r.height(), data)
}

fn field_moments(field: &Plane) -> Moments {
    parallel::fold_bands(
        field.data(),
        field.width(),
        Moments::new,
        |mut acc, band| {
            acc.extend(band.iter().copied());
            acc
        },
        Moments::merge,
    )
}

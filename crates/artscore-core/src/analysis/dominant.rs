//! Exact-color frequency histogram and dominant color extraction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::image::{PixelBuffer, Rgb};

/// Default number of dominant colors reported.
pub const DEFAULT_NUM_DOMINANT_COLORS: usize = 5;

/// One entry of a dominant color ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    /// Exact RGB value.
    pub color: Rgb,
    /// Number of pixels with this color.
    pub count: u64,
    /// `count / total_pixels`, in `[0, 1]`.
    pub proportion: f64,
}

/// Occurrence count per exact RGB triple.
///
/// Iteration order is first-encountered order in a row-major scan.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: IndexMap<Rgb, u64>,
    total: u64,
}

impl ColorHistogram {
    /// Count every pixel of `pixels` in order.
    pub fn from_pixels(pixels: impl IntoIterator<Item = Rgb>) -> Self {
        let mut histogram = Self::default();
        for rgb in pixels {
            *histogram.counts.entry(rgb).or_insert(0) += 1;
            histogram.total += 1;
        }
        histogram
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(color, count)` pairs in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgb, u64)> + '_ {
        self.counts.iter().map(|(&color, &count)| (color, count))
    }

    /// The `k` most frequent colors, most frequent first. Equal counts keep
    /// first-encountered order.
    pub fn top(&self, k: usize) -> Vec<DominantColor> {
        let mut ranked: Vec<(Rgb, u64)> = self.iter().collect();
        // Stable sort keeps scan order among ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);

        let total = self.total as f64;
        ranked
            .into_iter()
            .map(|(color, count)| DominantColor {
                color,
                count,
                proportion: if total > 0.0 { count as f64 / total } else { 0.0 },
            })
            .collect()
    }
}

/// Build the exact-color histogram of an RGB buffer.
pub fn color_histogram(buffer: &PixelBuffer) -> Result<ColorHistogram> {
    buffer.require_rgb()?;
    Ok(ColorHistogram::from_pixels(buffer.rgb_pixels()))
}

/// The `k` most frequent exact colors with their share of the image.
///
/// Returns `min(k, distinct colors)` entries sorted by non-increasing
/// proportion. Proportions need not sum to one.
pub fn dominant_colors(buffer: &PixelBuffer, k: usize) -> Result<Vec<DominantColor>> {
    if k == 0 {
        return Err(AnalysisError::invalid(
            "num_dominant_colors",
            "must be greater than zero",
        ));
    }
    buffer.require_rgb()?;
    buffer.require_non_empty()?;

    let histogram = color_histogram(buffer)?;
    let top = histogram.top(k);
    tracing::debug!(
        distinct = histogram.len(),
        reported = top.len(),
        "dominant colors"
    );
    Ok(top)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_ranks_by_frequency() {
        let image = PixelBuffer::from_rgb(
            3,
            2,
            vec![
                [1, 1, 1],
                [2, 2, 2],
                [2, 2, 2],
                [3, 3, 3],
                [2, 2, 2],
                [3, 3, 3],
            ],
        )
        .unwrap();
        let top = dominant_colors(&image, 5).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].color, [2, 2, 2]);
        assert_eq!(top[0].count, 3);
        assert!((top[0].proportion - 0.5).abs() < EPSILON);
        assert_eq!(top[1].color, [3, 3, 3]);
        assert_eq!(top[2].color, [1, 1, 1]);
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let image = PixelBuffer::from_rgb(
            2,
            2,
            vec![[9, 0, 0], [0, 9, 0], [0, 0, 9], [5, 5, 5]],
        )
        .unwrap();
        let colors: Vec<Rgb> = dominant_colors(&image, 4)
            .unwrap()
            .into_iter()
            .map(|d| d.color)
            .collect();
        assert_eq!(colors, vec![[9, 0, 0], [0, 9, 0], [0, 0, 9], [5, 5, 5]]);
    }

    #[test]
    fn test_truncates_to_k() {
        let pixels = (0..50u8).map(|v| [v, v, v]).collect();
        let image = PixelBuffer::from_rgb(10, 5, pixels).unwrap();
        let top = dominant_colors(&image, 5).unwrap();
        assert_eq!(top.len(), 5);
        let sum: f64 = top.iter().map(|d| d.proportion).sum();
        assert!(sum < 1.0);
        assert!(top.windows(2).all(|w| w[0].proportion >= w[1].proportion));
    }

    #[test]
    fn test_zero_k_is_invalid() {
        let image = PixelBuffer::from_rgb(1, 1, vec![[0, 0, 0]]).unwrap();
        assert!(matches!(
            dominant_colors(&image, 0),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_histogram_counts_every_pixel() {
        let image = PixelBuffer::from_rgb(2, 2, vec![[1, 2, 3], [1, 2, 3], [4, 5, 6], [1, 2, 3]]).unwrap();
        let histogram = color_histogram(&image).unwrap();
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.total(), 4);
        let counts: Vec<_> = histogram.iter().collect();
        assert_eq!(counts, vec![([1, 2, 3], 3), ([4, 5, 6], 1)]);
    }
}

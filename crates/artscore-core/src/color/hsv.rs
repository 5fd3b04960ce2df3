//! RGB to HSV conversion.
//!
//! Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.
//! Achromatic inputs have no defined hue; it is reported as `0.0`.
//! Black has no defined saturation; it is reported as `0.0`.

use serde::{Deserialize, Serialize};

use crate::image::{PixelBuffer, Rgb};

/// A hue/saturation/value triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation, `[0, 1]`.
    pub saturation: f64,
    /// Value (brightness), `[0, 1]`.
    pub value: f64,
}

/// Convert normalized RGB (`[0, 1]` per channel) to HSV.
///
/// ```text
/// v    = max(r, g, b)
/// diff = max − min
/// s    = diff / v            (0 when v = 0)
/// h    = 60 · ((g − b)/diff mod 6)   if max is r
///        60 · ((b − r)/diff + 2)     if max is g
///        60 · ((r − g)/diff + 4)     if max is b
///        0                           if diff = 0
/// ```
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let saturation = if max != 0.0 { diff / max } else { 0.0 };

    let hue = if diff == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / diff).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / diff + 2.0)
    } else {
        60.0 * ((r - g) / diff + 4.0)
    };

    Hsv {
        // rem_euclid can round up to exactly 6.0 for tiny negative ratios.
        hue: if hue >= 360.0 { 0.0 } else { hue },
        saturation,
        value: max,
    }
}

/// Convert an 8-bit RGB sample to HSV.
pub fn rgb8_to_hsv(rgb: Rgb) -> Hsv {
    rgb_to_hsv(
        rgb[0] as f64 / 255.0,
        rgb[1] as f64 / 255.0,
        rgb[2] as f64 / 255.0,
    )
}

/// Convert every pixel of `buffer` to HSV, in row-major order. Alpha is ignored.
pub fn hsv_pixels(buffer: &PixelBuffer) -> Vec<Hsv> {
    buffer.rgb_pixels().map(rgb8_to_hsv).collect()
}

impl From<Hsv> for palette::Hsv<palette::encoding::Srgb, f64> {
    fn from(hsv: Hsv) -> Self {
        palette::Hsv::new(hsv.hue, hsv.saturation, hsv.value)
    }
}

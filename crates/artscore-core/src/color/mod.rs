//! Color space conversion.

pub mod hsv;

pub use hsv::{Hsv, hsv_pixels, rgb_to_hsv, rgb8_to_hsv};

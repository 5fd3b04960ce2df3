//! Sobel gradient kernels and per-channel gradient magnitude fields.

use crate::filter::convolve::{Kernel3, Plane, convolve_2d};
use crate::image::PixelBuffer;

/// Horizontal Sobel kernel.
pub const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Vertical Sobel kernel.
pub const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient magnitude `sqrt(gx² + gy²)` of a single plane.
pub fn gradient_magnitude(plane: &Plane) -> Plane {
    let gx = convolve_2d(plane, &SOBEL_X);
    let gy = convolve_2d(plane, &SOBEL_Y);
    let data = gx
        .data()
        .iter()
        .zip(gy.data())
        .map(|(&x, &y)| (x * x + y * y).sqrt())
        .collect();
    Plane::from_parts(plane.width(), plane.height(), data)
}

/// Gradient magnitude fields for the R, G, and B channels of `buffer`.
pub fn channel_gradient_fields(buffer: &PixelBuffer) -> [Plane; 3] {
    [0, 1, 2].map(|c| gradient_magnitude(&buffer.channel_plane(c)))
}

//! Spatial filtering: 3×3 convolution and Sobel gradients.

pub mod convolve;
pub mod sobel;

pub use convolve::{Kernel3, Plane, convolve_2d};
pub use sobel::{SOBEL_X, SOBEL_Y, gradient_magnitude};

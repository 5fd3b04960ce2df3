//! "Same"-size 2-D convolution with symmetric boundary reflection.
//!
//! Out-of-range samples mirror the plane across its edge, including the edge
//! sample itself: index `-1` reads index `0` and index `n` reads `n - 1`.
//! A flat plane therefore has no artificial edges along its border.

use crate::error::{AnalysisError, Result};
use crate::parallel;

/// A 3×3 kernel indexed as `kernel[row][column]`.
pub type Kernel3 = [[f64; 3]; 3];

/// Row-major single-channel plane of double-precision samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Wrap row-major samples, rejecting data whose length is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(AnalysisError::BufferSizeMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self::from_parts(width, height, data))
    }

    /// Caller guarantees `data.len() == width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height, "plane size mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    /// A plane with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self::from_parts(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }
}

/// Map an index onto `0..len` by symmetric reflection (`d c b a | a b c d | d c b a`).
pub fn reflect(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    let period = 2 * len as isize;
    let m = index.rem_euclid(period) as usize;
    if m < len { m } else { 2 * len - 1 - m }
}

/// Convolve `plane` with `kernel`, producing a plane of the same size.
///
/// This is true convolution (the kernel is flipped), matching the usual
/// signal-processing definition:
///
/// ```text
/// out[y][x] = Σ kernel[i][j] · in[y + 1 − i][x + 1 − j]
/// ```
pub fn convolve_2d(plane: &Plane, kernel: &Kernel3) -> Plane {
    let (width, height) = (plane.width, plane.height);
    let mut out = vec![0.0_f64; width * height];

    parallel::fill_rows(&mut out, width, |y, row| {
        let rows = [
            reflect(y as isize + 1, height),
            y,
            reflect(y as isize - 1, height),
        ];
        for (x, dst) in row.iter_mut().enumerate() {
            let cols = [
                reflect(x as isize + 1, width),
                x,
                reflect(x as isize - 1, width),
            ];
            let mut acc = 0.0;
            for (ki, &sy) in rows.iter().enumerate() {
                let src_row = &plane.data[sy * width..(sy + 1) * width];
                for (kj, &sx) in cols.iter().enumerate() {
                    acc += kernel[ki][kj] * src_row[sx];
                }
            }
            *dst = acc;
        }
    });

    Plane::from_parts(width, height, out)
}

//! Pixel buffer shared by every analyzer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, Result};
use crate::filter::convolve::Plane;

/// A single 8-bit RGB sample.
pub type Rgb = [u8; 3];

/// Channel counts accepted by [`PixelBuffer`].
pub const SUPPORTED_CHANNELS: &[usize] = &[3, 4];

/// Interleaved channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha (straight, not premultiplied).
    Rgba,
}

impl ChannelLayout {
    /// Number of interleaved samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Resolve a layout from a raw channel count.
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            found => Err(AnalysisError::UnsupportedChannelCount {
                found,
                supported: SUPPORTED_CHANNELS,
            }),
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
        }
    }
}

/// Row-major 8-bit image handed over by the decoding collaborator.
///
/// Pixels are stored interleaved, left to right then top to bottom. The
/// buffer is immutable once built; analyzers only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Build a buffer from interleaved samples.
    ///
    /// Zero-area buffers are accepted here; analyzers that divide by the
    /// pixel count reject them with [`AnalysisError::EmptyImage`].
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let layout = ChannelLayout::from_channels(channels)?;
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(AnalysisError::BufferSizeMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Build an RGB buffer from packed pixels.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        let data = bytemuck::cast_slice::<_, u8>(pixels.as_slice()).to_vec();
        Self::new(width, height, 3, data)
    }

    /// Build an RGBA buffer from packed pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Result<Self> {
        let data = bytemuck::cast_slice::<_, u8>(pixels.as_slice()).to_vec();
        Self::new(width, height, 4, data)
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Raw interleaved samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Packed RGB view, available only for 3-channel buffers.
    pub fn as_rgb_slice(&self) -> Option<&[Rgb]> {
        match self.layout {
            ChannelLayout::Rgb => Some(bytemuck::cast_slice(&self.data)),
            ChannelLayout::Rgba => None,
        }
    }

    /// Per-pixel channel slices in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels())
    }

    /// Per-pixel RGB triples in row-major order. Alpha, if any, is skipped.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels().map(|p| [p[0], p[1], p[2]])
    }

    /// Extract one channel as a double-precision plane.
    pub fn channel_plane(&self, channel: usize) -> Plane {
        let stride = self.channels();
        let data = self
            .data
            .iter()
            .skip(channel)
            .step_by(stride)
            .map(|&v| v as f64)
            .collect();
        Plane::from_parts(self.width as usize, self.height as usize, data)
    }

    /// Copy of this buffer with alpha dropped. RGB buffers are cloned as-is.
    pub fn to_rgb(&self) -> Self {
        match self.layout {
            ChannelLayout::Rgb => self.clone(),
            ChannelLayout::Rgba => Self {
                width: self.width,
                height: self.height,
                layout: ChannelLayout::Rgb,
                data: self.rgb_pixels().flatten().collect(),
            },
        }
    }

    /// Guard for analyzers defined over exactly three channels.
    pub fn require_rgb(&self) -> Result<()> {
        match self.layout {
            ChannelLayout::Rgb => Ok(()),
            ChannelLayout::Rgba => {
                tracing::warn!("rejecting {} buffer, analyzer needs RGB", self.layout);
                Err(AnalysisError::UnsupportedChannelCount {
                    found: 4,
                    supported: &[3],
                })
            }
        }
    }

    /// Guard for analyzers that divide by the pixel count.
    pub fn require_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            tracing::warn!("rejecting {}x{} buffer with zero area", self.width, self.height);
            return Err(AnalysisError::EmptyImage);
        }
        Ok(())
    }
}

//! Adapter from encoded image files to [`PixelBuffer`].
//!
//! Decoding is delegated to the `image` crate (PNG, JPEG, TIFF, and the
//! other formats it enables). Everything is converted to 8-bit samples.

use std::path::Path;

use ::image::DynamicImage;

use crate::error::DecodeError;
use crate::image::PixelBuffer;

/// Decode `path` into an 8-bit RGB buffer. Alpha, if present, is dropped.
pub fn open_rgb(path: &Path) -> Result<PixelBuffer, DecodeError> {
    open(path, false)
}

/// Decode `path`, keeping an alpha channel when the source has one.
pub fn open_with_alpha(path: &Path) -> Result<PixelBuffer, DecodeError> {
    open(path, true)
}

/// Read image dimensions from the file header without decoding pixels.
pub fn dimensions(path: &Path) -> Result<(u32, u32), DecodeError> {
    Ok(::image::image_dimensions(path)?)
}

/// Convert an already decoded image.
///
/// With `keep_alpha`, images whose color type carries alpha become RGBA;
/// everything else becomes RGB.
pub fn from_dynamic_image(img: &DynamicImage, keep_alpha: bool) -> Result<PixelBuffer, DecodeError> {
    let (width, height) = (img.width(), img.height());
    let buffer = if keep_alpha && img.color().has_alpha() {
        PixelBuffer::new(width, height, 4, img.to_rgba8().into_raw())?
    } else {
        PixelBuffer::new(width, height, 3, img.to_rgb8().into_raw())?
    };
    Ok(buffer)
}

fn open(path: &Path, keep_alpha: bool) -> Result<PixelBuffer, DecodeError> {
    let img = ::image::open(path)?;
    let buffer = from_dynamic_image(&img, keep_alpha)?;
    tracing::info!(
        "decoded {} ({}x{}, {})",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.layout()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;
    use ::image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_rgb_image_converts_in_row_major_order() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 0, Rgb([10, 20, 30]));
        img.put_pixel(0, 1, Rgb([40, 50, 60]));
        let buffer = from_dynamic_image(&DynamicImage::ImageRgb8(img), true).unwrap();
        assert_eq!(buffer.layout(), ChannelLayout::Rgb);
        assert_eq!(
            buffer.as_rgb_slice().unwrap(),
            &[[0, 0, 0], [10, 20, 30], [40, 50, 60], [0, 0, 0]]
        );
    }

    #[test]
    fn test_alpha_is_dropped_unless_requested() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 1, Rgba([1, 2, 3, 128])));
        let rgb = from_dynamic_image(&img, false).unwrap();
        assert_eq!(rgb.layout(), ChannelLayout::Rgb);
        assert_eq!(rgb.as_bytes(), &[1, 2, 3, 1, 2, 3, 1, 2, 3]);

        let rgba = from_dynamic_image(&img, true).unwrap();
        assert_eq!(rgba.layout(), ChannelLayout::Rgba);
        assert_eq!(rgba.pixels().next(), Some(&[1u8, 2, 3, 128][..]));
    }

    #[test]
    fn test_grayscale_source_expands_to_rgb() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([77])));
        let buffer = from_dynamic_image(&img, true).unwrap();
        assert_eq!(buffer.as_bytes(), &[77, 77, 77]);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let path = Path::new("/nonexistent/artscore/missing.png");
        assert!(open_rgb(path).is_err());
        assert!(dimensions(path).is_err());
    }
}

//! Source raster storage, upload media gate and cropping.
//!
//! A [`Raster`] is an ndarray of shape (height, width, 4) holding RGBA u8
//! values. The export pipeline only ever borrows it; crops are owned copies.

use std::str::FromStr;

use image::ImageFormat;
use ndarray::{s, Array3};

use crate::error::{Result, StagError};
use crate::selection::BoundingBox;

/// Media types accepted for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Png,
    Jpeg,
}

impl MediaType {
    /// Validate a declared MIME type (`image/png`, `image/jpeg`, `image/jpg`).
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(MediaType::Png),
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            _ => Err(StagError::UnsupportedMediaType(mime.to_string())),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            MediaType::Png => ImageFormat::Png,
            MediaType::Jpeg => ImageFormat::Jpeg,
        }
    }
}

impl FromStr for MediaType {
    type Err = StagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_mime(s)
    }
}

/// RGBA8 image the selection is made on.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pixels: Array3<u8>,
}

impl Raster {
    /// Wrap an existing (height, width, 4) array.
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = pixels.dim();
        if channels != 4 {
            return Err(StagError::InvalidChannels(channels));
        }
        Ok(Self { pixels })
    }

    /// Build from a flat RGBA buffer (length = width * height * 4).
    pub fn from_rgba(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(StagError::InvalidRaster {
                expected,
                actual: data.len(),
            });
        }
        let pixels = Array3::from_shape_vec((height, width, 4), data).map_err(|_| {
            StagError::InvalidRaster {
                expected,
                actual: expected,
            }
        })?;
        Ok(Self { pixels })
    }

    /// Decode an uploaded file after checking its declared media type.
    pub fn decode(bytes: &[u8], mime: &str) -> Result<Self> {
        let media_type = MediaType::from_mime(mime)?;
        let decoded = image::load_from_memory_with_format(bytes, media_type.image_format())?;
        let rgba = decoded.to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);
        tracing::debug!(width, height, ?media_type, "decoded source raster");
        Self::from_rgba(rgba.into_raw(), width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// RGBA of one pixel, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
            self.pixels[[y, x, 3]],
        ])
    }

    /// Owned copy of the pixels inside `bounds` (inclusive), clipped to the raster.
    pub fn crop(&self, bounds: BoundingBox) -> Array3<u8> {
        let max_x = bounds.max_x.min(self.width().saturating_sub(1));
        let max_y = bounds.max_y.min(self.height().saturating_sub(1));
        if self.width() == 0 || self.height() == 0 || bounds.min_x > max_x || bounds.min_y > max_y
        {
            return Array3::zeros((0, 0, 4));
        }
        self.pixels
            .slice(s![bounds.min_y..=max_y, bounds.min_x..=max_x, ..])
            .to_owned()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    #[test]
    fn test_media_gate() {
        assert_eq!(MediaType::from_mime("image/png").unwrap(), MediaType::Png);
        assert_eq!(MediaType::from_mime("image/jpg").unwrap(), MediaType::Jpeg);
        assert_eq!(MediaType::from_mime("IMAGE/JPEG").unwrap(), MediaType::Jpeg);
        assert!(matches!(
            MediaType::from_mime("image/gif"),
            Err(StagError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_from_rgba_length_mismatch() {
        let err = Raster::from_rgba(vec![0u8; 10], 2, 2).unwrap_err();
        assert!(matches!(err, StagError::InvalidRaster { expected: 16, actual: 10 }));
    }

    #[test]
    fn test_from_array_requires_rgba() {
        let rgb = Array3::<u8>::zeros((2, 2, 3));
        assert!(matches!(Raster::from_array(rgb), Err(StagError::InvalidChannels(3))));
    }

    #[test]
    fn test_decode_png() {
        let img = ImageBuffer::from_fn(3, 2, |x, y| Rgba([x as u8 * 10, y as u8 * 20, 5, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

        let raster = Raster::decode(&bytes, "image/png").unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.pixel(2, 1), Some([20, 20, 5, 255]));
        assert_eq!(raster.pixel(3, 0), None);
    }

    #[test]
    fn test_decode_rejects_before_decoding() {
        let err = Raster::decode(b"not an image", "image/webp").unwrap_err();
        assert!(matches!(err, StagError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_crop_inclusive() {
        let mut pixels = Array3::<u8>::zeros((4, 5, 4));
        pixels[[2, 3, 0]] = 99;
        let raster = Raster::from_array(pixels).unwrap();

        let crop = raster.crop(BoundingBox { min_x: 1, min_y: 1, max_x: 3, max_y: 2 });
        assert_eq!(crop.dim(), (2, 3, 4));
        assert_eq!(crop[[1, 2, 0]], 99);
    }
}

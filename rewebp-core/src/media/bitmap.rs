use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::error::{RewebpError, RewebpResult};

/// An in-memory decoded frame: owned straight-alpha RGBA8 pixels.
///
/// A `Bitmap` is owned exclusively by its holder (normally the frame
/// sequence); dropping the value releases the pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    /// Wrap an already-decoded RGBA8 image.
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Build a bitmap from raw RGBA bytes.
    ///
    /// Fails when `data` does not hold exactly `width * height * 4` bytes.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> RewebpResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RewebpError::validation(format!(
                "rgba buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        let pixels = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            RewebpError::validation(format!("rgba buffer does not fit {width}x{height}"))
        })?;
        Ok(Self { pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Scale to `width x height` with high-quality resampling (Lanczos3).
    ///
    /// Returns a borrowed handle when the bitmap already matches the target
    /// size, so callers can tell newly-allocated copies from originals.
    pub fn scaled_to(&self, width: u32, height: u32) -> ScaledBitmap<'_> {
        if self.width() == width && self.height() == height {
            return ScaledBitmap::Borrowed(self);
        }
        let resized = imageops::resize(&self.pixels, width, height, FilterType::Lanczos3);
        ScaledBitmap::Owned(Self { pixels: resized })
    }

    /// Extract the raw per-pixel color buffer for encoding.
    pub fn to_pixels(&self) -> PixelBuffer {
        PixelBuffer {
            width: self.width(),
            height: self.height(),
            rgba: self.pixels.as_raw().clone(),
        }
    }
}

/// Raw straight-alpha RGBA bytes extracted from a [`Bitmap`], ready for an
/// encoder entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interleaved RGBA bytes, `width * height * 4` long.
    pub rgba: Vec<u8>,
}

/// Result of [`Bitmap::scaled_to`].
///
/// `Owned` marks a newly-allocated copy that is released (dropped) once the
/// encode step no longer needs it; `Borrowed` points back at the original.
#[derive(Debug)]
pub enum ScaledBitmap<'a> {
    /// The source already matched the target size.
    Borrowed(&'a Bitmap),
    /// A newly-allocated scaled copy.
    Owned(Bitmap),
}

impl ScaledBitmap<'_> {
    /// Borrow the underlying bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        match self {
            Self::Borrowed(b) => b,
            Self::Owned(b) => b,
        }
    }

    /// Whether this handle owns a newly-allocated copy.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/bitmap.rs"]
mod tests;

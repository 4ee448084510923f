//! BMP and PNG cover images.
//!
//! Only 8-bit-per-channel RGB images are accepted: 24-bit BMP and RGB PNG.
//! Channels are addressed R=0, G=1, B=2 for both formats.
//!
//! Rows are numbered in the order the file stores them. PNG stores rows top
//! to bottom; BMP stores them bottom to top, so grid row 0 of a BMP is the
//! bottom row of the picture.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, RgbImage};
use tracing::debug;

use super::PixelGrid;
use crate::error::{Result, StegimError};

/// Supported cover formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Bmp,
    Png,
}

impl ImageKind {
    /// Picks the kind from the file extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "bmp" => Ok(ImageKind::Bmp),
            "png" => Ok(ImageKind::Png),
            _ => Err(StegimError::UnsupportedImage(format!(
                "{}: use .bmp or .png (24-bit RGB)",
                path.display()
            ))),
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Bmp => ImageFormat::Bmp,
            ImageKind::Png => ImageFormat::Png,
        }
    }

    fn bottom_up(self) -> bool {
        matches!(self, ImageKind::Bmp)
    }
}

/// A decoded cover image exposed as a [`PixelGrid`].
pub struct CoverImage {
    kind: ImageKind,
    pixels: RgbImage,
}

impl CoverImage {
    /// Loads a cover image, choosing the decoder from the extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let kind = ImageKind::from_path(path)?;
        let bytes = fs::read(path)?;
        let cover = Self::from_bytes(&bytes, kind)?;
        debug!(
            path = %path.display(),
            kind = ?kind,
            width = cover.pixels.width(),
            height = cover.pixels.height(),
            "cover image loaded"
        );
        Ok(cover)
    }

    /// Decodes an encoded image of the given kind.
    pub fn from_bytes(bytes: &[u8], kind: ImageKind) -> Result<Self> {
        let image = image::load_from_memory_with_format(bytes, kind.format())
            .map_err(|e| StegimError::ImageCodec(e.to_string()))?;

        match image {
            DynamicImage::ImageRgb8(pixels) => Ok(Self { kind, pixels }),
            other => Err(StegimError::UnsupportedImage(format!(
                "{:?} pixels, expected 8-bit RGB",
                other.color()
            ))),
        }
    }

    /// Wraps already decoded pixels.
    pub fn from_rgb(pixels: RgbImage, kind: ImageKind) -> Self {
        Self { kind, pixels }
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Encodes the image in its own format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.encode(self.kind)
    }

    /// Writes the image to `path`, in the format named by its extension.
    ///
    /// Grid row 0 stays the first row stored in the file, so the rows are
    /// flipped when converting between BMP and PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let kind = ImageKind::from_path(path)?;
        let bytes = if kind.bottom_up() == self.kind.bottom_up() {
            self.encode(kind)?
        } else {
            debug!(from = ?self.kind, to = ?kind, "flipping rows for format change");
            encode_pixels(&imageops::flip_vertical(&self.pixels), kind)?
        };
        fs::write(path, bytes)?;
        debug!(path = %path.display(), kind = ?kind, "cover image written");
        Ok(())
    }

    /// Returns a reference to the underlying pixels.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Consumes self and returns the underlying pixels.
    pub fn into_pixels(self) -> RgbImage {
        self.pixels
    }

    fn encode(&self, kind: ImageKind) -> Result<Vec<u8>> {
        encode_pixels(&self.pixels, kind)
    }

    fn image_y(&self, row: usize) -> u32 {
        if self.kind.bottom_up() {
            self.pixels.height() - 1 - row as u32
        } else {
            row as u32
        }
    }
}

fn encode_pixels(pixels: &RgbImage, kind: ImageKind) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut bytes), kind.format())
        .map_err(|e| StegimError::ImageCodec(e.to_string()))?;
    Ok(bytes)
}

impl PixelGrid for CoverImage {
    fn width(&self) -> usize {
        self.pixels.width() as usize
    }

    fn height(&self) -> usize {
        self.pixels.height() as usize
    }

    fn channel(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.pixels.get_pixel(col as u32, self.image_y(row)).0[channel]
    }

    fn set_channel(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        let y = self.image_y(row);
        self.pixels.get_pixel_mut(col as u32, y).0[channel] = value;
    }
}

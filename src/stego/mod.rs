//! Hiding LZW codes in the least significant bit of the blue channel.
//!
//! - [`bits`]: slot cursor, bit writer and bit reader
//! - [`checksum`]: CRC32 over the code sequence
//! - [`record`]: the embedded record (watermark, length, codes, checksum)
//! - [`image`]: BMP/PNG cover images

pub mod bits;
pub mod checksum;
pub mod image;
pub mod record;

pub use bits::{BitCursor, BitReader, BitWriter, CHANNEL, PIXEL_STRIDE};
pub use checksum::checksum;
pub use image::{CoverImage, ImageKind};
pub use record::{embed, extract, has_watermark, max_codes, record_bits, WATERMARK};

/// A grid of 8-bit RGB pixels.
///
/// `col` is a pixel index and `channel` is 0, 1 or 2.
pub trait PixelGrid {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn channel(&self, row: usize, col: usize, channel: usize) -> u8;

    fn set_channel(&mut self, row: usize, col: usize, channel: usize, value: u8);

    /// One usable bit per pixel.
    fn slots(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

/// Plain row-major RGB buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbGrid {
    /// Creates a black grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Creates a grid with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: [u8; 3]) -> Self {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * PIXEL_STRIDE)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps raw RGB bytes. Returns `None` if the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * PIXEL_STRIDE).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * PIXEL_STRIDE + channel
    }
}

impl PixelGrid for RgbGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn channel(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.data[self.offset(row, col, channel)]
    }

    fn set_channel(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        let offset = self.offset(row, col, channel);
        self.data[offset] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_grid_addressing() {
        let mut grid = RgbGrid::new(4, 3);
        grid.set_channel(2, 1, CHANNEL, 0x7F);
        assert_eq!(grid.channel(2, 1, CHANNEL), 0x7F);
        assert_eq!(grid.as_raw()[(2 * 4 + 1) * 3 + 2], 0x7F);
        assert_eq!(grid.slots(), 12);
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(RgbGrid::from_raw(2, 2, vec![0; 12]).is_some());
        assert!(RgbGrid::from_raw(2, 2, vec![0; 11]).is_none());
    }
}

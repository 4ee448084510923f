//! Sequential single-bit access to the designated channel of a pixel grid.
//!
//! Slots are visited row by row, one pixel per slot, and only bit 0 of the
//! designated channel byte is ever touched.

use super::PixelGrid;
use crate::error::{Result, StegimError};

/// Bytes per pixel in a row of 8-bit RGB data.
pub const PIXEL_STRIDE: usize = 3;

/// Channel carrying the hidden bits (the third byte of each pixel).
pub const CHANNEL: usize = 2;

/// Position of the next slot, as a byte column within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitCursor {
    row: usize,
    column: usize,
}

impl BitCursor {
    /// First slot: row 0, the designated channel of pixel 0.
    pub fn start() -> Self {
        Self {
            row: 0,
            column: CHANNEL,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Byte offset of the slot within its row.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Pixel index of the slot within its row.
    pub fn pixel(&self) -> usize {
        self.column / PIXEL_STRIDE
    }

    /// Steps to the next pixel, wrapping to the start of the next row after
    /// the last pixel.
    pub fn advance(&mut self, width: usize) {
        self.column += PIXEL_STRIDE;
        if self.column >= width * PIXEL_STRIDE {
            self.column = CHANNEL;
            self.row += 1;
        }
    }

    fn in_bounds<G: PixelGrid + ?Sized>(&self, grid: &G) -> bool {
        self.row < grid.height() && self.pixel() < grid.width()
    }
}

impl Default for BitCursor {
    fn default() -> Self {
        Self::start()
    }
}

/// Writes bits into consecutive slots.
pub struct BitWriter<'a, G: PixelGrid + ?Sized> {
    grid: &'a mut G,
    cursor: BitCursor,
    written: u64,
}

impl<'a, G: PixelGrid + ?Sized> BitWriter<'a, G> {
    pub fn new(grid: &'a mut G) -> Self {
        Self {
            grid,
            cursor: BitCursor::start(),
            written: 0,
        }
    }

    /// Number of slots written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Sets bit 0 of the current slot and moves to the next one.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if !self.cursor.in_bounds(&*self.grid) {
            return Err(StegimError::CapacityTooSmall {
                needed: self.written + 1,
                available: self.grid.slots(),
            });
        }

        let (row, pixel) = (self.cursor.row(), self.cursor.pixel());
        let byte = self.grid.channel(row, pixel, CHANNEL);
        let byte = if bit { byte | 0x01 } else { byte & 0xFE };
        self.grid.set_channel(row, pixel, CHANNEL, byte);

        self.cursor.advance(self.grid.width());
        self.written += 1;
        Ok(())
    }

    /// Writes the low `width` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, width: u32) -> Result<()> {
        debug_assert!(width <= 32);
        for shift in (0..width).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }
}

/// Reads bits from consecutive slots.
pub struct BitReader<'a, G: PixelGrid + ?Sized> {
    grid: &'a G,
    cursor: BitCursor,
    read: u64,
}

impl<'a, G: PixelGrid + ?Sized> BitReader<'a, G> {
    pub fn new(grid: &'a G) -> Self {
        Self {
            grid,
            cursor: BitCursor::start(),
            read: 0,
        }
    }

    /// Slots not yet consumed.
    pub fn remaining(&self) -> u64 {
        self.grid.slots().saturating_sub(self.read)
    }

    /// Returns bit 0 of the current slot, or `None` past the last pixel.
    pub fn read_bit(&mut self) -> Option<bool> {
        if !self.cursor.in_bounds(self.grid) {
            return None;
        }

        let byte = self
            .grid
            .channel(self.cursor.row(), self.cursor.pixel(), CHANNEL);
        self.cursor.advance(self.grid.width());
        self.read += 1;
        Some(byte & 0x01 == 1)
    }

    /// Reads `width` bits, most significant first.
    pub fn read_bits(&mut self, width: u32) -> Option<u32> {
        debug_assert!(width <= 32);
        let mut value = 0u32;
        for _ in 0..width {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::RgbGrid;

    #[test]
    fn test_cursor_wraps_rows() {
        let mut cursor = BitCursor::start();
        assert_eq!((cursor.row(), cursor.column()), (0, 2));
        cursor.advance(2);
        assert_eq!((cursor.row(), cursor.column(), cursor.pixel()), (0, 5, 1));
        cursor.advance(2);
        assert_eq!((cursor.row(), cursor.column(), cursor.pixel()), (1, 2, 0));
    }

    #[test]
    fn test_writer_touches_only_lsb_of_channel() {
        let mut grid = RgbGrid::filled(3, 2, [0xAA, 0xBB, 0xCC]);
        {
            let mut writer = BitWriter::new(&mut grid);
            writer.write_bits(0b101011, 6).unwrap();
            assert_eq!(writer.written(), 6);
        }

        let blues: Vec<u8> = grid.as_raw().chunks(3).map(|p| p[2]).collect();
        assert_eq!(blues, vec![0xCD, 0xCC, 0xCD, 0xCC, 0xCD, 0xCD]);
        assert!(grid.as_raw().chunks(3).all(|p| p[0] == 0xAA && p[1] == 0xBB));
    }

    #[test]
    fn test_reader_matches_writer() {
        let mut grid = RgbGrid::new(7, 9);
        {
            let mut writer = BitWriter::new(&mut grid);
            writer.write_bits(0xDEAD_BEEF, 32).unwrap();
            writer.write_bits(0xABC, 12).unwrap();
        }

        let mut reader = BitReader::new(&grid);
        assert_eq!(reader.read_bits(32), Some(0xDEAD_BEEF));
        assert_eq!(reader.read_bits(12), Some(0xABC));
        assert_eq!(reader.remaining(), 63 - 44);
    }

    #[test]
    fn test_exhausted_grid() {
        let mut grid = RgbGrid::new(2, 2);
        let mut writer = BitWriter::new(&mut grid);
        writer.write_bits(0b1111, 4).unwrap();
        assert!(matches!(
            writer.write_bit(true),
            Err(StegimError::CapacityTooSmall {
                needed: 5,
                available: 4
            })
        ));

        let mut reader = BitReader::new(&grid);
        assert_eq!(reader.read_bits(4), Some(0b1111));
        assert_eq!(reader.read_bit(), None);
    }
}

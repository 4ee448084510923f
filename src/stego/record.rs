//! The embedded record.
//!
//! Layout, contiguous slots with no padding, every field most significant
//! bit first:
//!
//! ```text
//! watermark (16) | code count (32) | codes (count x 12) | checksum (32)
//! ```

use tracing::{debug, warn};

use super::bits::{BitReader, BitWriter};
use super::checksum::checksum;
use super::PixelGrid;
use crate::error::{Result, StegimError};
use crate::lzw::{CODE_BITS, MAX_ENTRIES};

/// Marker written first, the ASCII bytes `hD`.
pub const WATERMARK: [u8; 2] = *b"hD";

const WATERMARK_BITS: u32 = 16;
const LENGTH_BITS: u32 = 32;
const CHECKSUM_BITS: u32 = 32;

/// Slots taken by everything except the codes.
const OVERHEAD_BITS: u64 = (WATERMARK_BITS + LENGTH_BITS + CHECKSUM_BITS) as u64;

/// Number of slots a record with `code_count` codes occupies.
pub fn record_bits(code_count: usize) -> u64 {
    OVERHEAD_BITS + code_count as u64 * u64::from(CODE_BITS)
}

/// Largest code count `grid` can hold.
pub fn max_codes<G: PixelGrid + ?Sized>(grid: &G) -> usize {
    let codes = grid.slots().saturating_sub(OVERHEAD_BITS) / u64::from(CODE_BITS);
    usize::try_from(codes.min(u64::from(u32::MAX))).unwrap_or(usize::MAX)
}

/// Writes `codes` into `grid`.
///
/// The capacity check runs before the first slot is touched, so on
/// [`StegimError::CapacityTooSmall`] the grid is unchanged.
pub fn embed<G: PixelGrid + ?Sized>(codes: &[u16], grid: &mut G) -> Result<()> {
    if codes.is_empty() {
        return Err(StegimError::InvalidInput(
            "code sequence is empty".to_string(),
        ));
    }
    if let Some(&code) = codes.iter().find(|&&c| usize::from(c) >= MAX_ENTRIES) {
        return Err(StegimError::InvalidInput(format!(
            "code {code} does not fit in {CODE_BITS} bits"
        )));
    }
    let count = u32::try_from(codes.len()).map_err(|_| {
        StegimError::InvalidInput(format!("{} codes exceed the length field", codes.len()))
    })?;

    let needed = record_bits(codes.len());
    let available = grid.slots();
    if available < needed {
        return Err(StegimError::CapacityTooSmall { needed, available });
    }

    let crc = checksum(codes);
    let mut writer = BitWriter::new(grid);
    writer.write_bits(u32::from(u16::from_be_bytes(WATERMARK)), WATERMARK_BITS)?;
    writer.write_bits(count, LENGTH_BITS)?;
    for &code in codes {
        writer.write_bits(u32::from(code), CODE_BITS)?;
    }
    writer.write_bits(crc, CHECKSUM_BITS)?;

    debug!(
        codes = codes.len(),
        slots = writer.written(),
        available,
        checksum = format_args!("{crc:#010x}"),
        "record embedded"
    );
    Ok(())
}

/// Reads the record back from `grid` and verifies it.
///
/// A missing watermark is [`StegimError::NoHiddenContent`]. A record that
/// does not fit the grid or fails its checksum is
/// [`StegimError::DamagedContent`].
pub fn extract<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u16>> {
    let mut reader = BitReader::new(grid);

    let watermark = reader
        .read_bits(WATERMARK_BITS)
        .ok_or(StegimError::NoHiddenContent)?;
    if watermark != u32::from(u16::from_be_bytes(WATERMARK)) {
        warn!(found = format_args!("{watermark:#06x}"), "watermark not found");
        return Err(StegimError::NoHiddenContent);
    }

    let count = reader
        .read_bits(LENGTH_BITS)
        .ok_or_else(|| StegimError::DamagedContent("length field truncated".to_string()))?;
    if count == 0 {
        return Err(StegimError::DamagedContent(
            "record declares no codes".to_string(),
        ));
    }
    let count = count as usize;
    let body_bits = count as u64 * u64::from(CODE_BITS) + u64::from(CHECKSUM_BITS);
    if body_bits > reader.remaining() {
        warn!(count, capacity = max_codes(grid), "declared length exceeds image");
        return Err(StegimError::DamagedContent(format!(
            "record declares {count} codes but the image holds at most {}",
            max_codes(grid)
        )));
    }

    let truncated = || StegimError::DamagedContent("record truncated".to_string());
    let mut codes = Vec::new();
    codes.try_reserve_exact(count)?;
    for _ in 0..count {
        let code = reader.read_bits(CODE_BITS).ok_or_else(truncated)?;
        codes.push(code as u16);
    }
    let stored = reader.read_bits(CHECKSUM_BITS).ok_or_else(truncated)?;

    let computed = checksum(&codes);
    if computed != stored {
        warn!(
            stored = format_args!("{stored:#010x}"),
            computed = format_args!("{computed:#010x}"),
            "checksum mismatch"
        );
        return Err(StegimError::DamagedContent(format!(
            "checksum mismatch (stored {stored:#010x}, computed {computed:#010x})"
        )));
    }

    debug!(codes = codes.len(), "record extracted");
    Ok(codes)
}

/// True when the first 16 slots carry the watermark.
pub fn has_watermark<G: PixelGrid + ?Sized>(grid: &G) -> bool {
    BitReader::new(grid).read_bits(WATERMARK_BITS)
        == Some(u32::from(u16::from_be_bytes(WATERMARK)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::{RgbGrid, CHANNEL};

    fn lsbs(grid: &RgbGrid) -> Vec<u8> {
        grid.as_raw().chunks(3).map(|p| p[CHANNEL] & 1).collect()
    }

    fn bits_of(value: u32, width: u32) -> Vec<u8> {
        (0..width).rev().map(|s| ((value >> s) & 1) as u8).collect()
    }

    #[test]
    fn test_record_bits() {
        assert_eq!(record_bits(0), 80);
        assert_eq!(record_bits(3), 116);
    }

    #[test]
    fn test_wire_layout() {
        let codes = [65u16, 256, 65];
        let mut grid = RgbGrid::new(116, 1);
        embed(&codes, &mut grid).unwrap();

        let mut expected = Vec::new();
        expected.extend(bits_of(0x6844, 16));
        expected.extend(bits_of(3, 32));
        for code in codes {
            expected.extend(bits_of(u32::from(code), 12));
        }
        expected.extend(bits_of(0xFE9F_A616, 32));
        assert_eq!(lsbs(&grid), expected);
    }

    #[test]
    fn test_exact_capacity_roundtrip() {
        let codes: Vec<u16> = (0..40u16).map(|i| i * 97 % 4096).collect();
        let needed = record_bits(codes.len()) as usize;
        // Odd row length so the record wraps across rows.
        let mut grid = RgbGrid::filled(7, needed / 7 + 1, [10, 20, 30]);
        assert!(grid.slots() as usize >= needed);

        embed(&codes, &mut grid).unwrap();
        assert!(has_watermark(&grid));
        assert_eq!(extract(&grid).unwrap(), codes);
    }

    #[test]
    fn test_capacity_too_small_leaves_grid_untouched() {
        let codes = vec![1u16; 10];
        let mut grid = RgbGrid::filled(199, 1, [1, 2, 3]);
        let before = grid.clone();

        let result = embed(&codes, &mut grid);
        assert!(matches!(
            result,
            Err(StegimError::CapacityTooSmall {
                needed: 200,
                available: 199
            })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_embed_rejects_invalid_codes() {
        let mut grid = RgbGrid::new(100, 100);
        assert!(matches!(
            embed(&[], &mut grid),
            Err(StegimError::InvalidInput(_))
        ));
        assert!(matches!(
            embed(&[4096], &mut grid),
            Err(StegimError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_extract_without_watermark() {
        let grid = RgbGrid::filled(50, 50, [0xFF, 0xFF, 0xFF]);
        assert!(matches!(extract(&grid), Err(StegimError::NoHiddenContent)));
        assert!(!has_watermark(&grid));

        let tiny = RgbGrid::new(3, 3);
        assert!(matches!(extract(&tiny), Err(StegimError::NoHiddenContent)));
    }

    #[test]
    fn test_single_flipped_bit_is_damage() {
        let codes: Vec<u16> = vec![72, 101, 108, 108, 111, 256, 258];
        let mut grid = RgbGrid::new(32, 8);
        embed(&codes, &mut grid).unwrap();

        // Slot 47 is the low bit of the length, 48..132 hold the codes and
        // 132..164 the checksum.
        for slot in [47usize, 48, 60, 100, 131, 140, 163] {
            let mut tampered = grid.clone();
            let (row, col) = (slot / 32, slot % 32);
            let value = tampered.channel(row, col, CHANNEL);
            tampered.set_channel(row, col, CHANNEL, value ^ 1);
            assert!(
                matches!(extract(&tampered), Err(StegimError::DamagedContent(_))),
                "slot {slot}"
            );
        }
    }

    #[test]
    fn test_oversized_length_is_damage() {
        let mut grid = RgbGrid::new(20, 10);
        embed(&[1, 2, 3], &mut grid).unwrap();

        // Set the top bit of the length field (slot 16).
        let value = grid.channel(0, 16, CHANNEL);
        grid.set_channel(0, 16, CHANNEL, value | 1);
        assert!(matches!(extract(&grid), Err(StegimError::DamagedContent(_))));
    }

    #[test]
    fn test_zero_length_is_damage() {
        let mut grid = RgbGrid::new(20, 10);
        {
            let mut writer = BitWriter::new(&mut grid);
            writer.write_bits(0x6844, 16).unwrap();
            writer.write_bits(0, 32).unwrap();
        }
        assert!(matches!(extract(&grid), Err(StegimError::DamagedContent(_))));
    }

    #[test]
    fn test_max_codes() {
        assert_eq!(max_codes(&RgbGrid::new(10, 8)), 0);
        assert_eq!(max_codes(&RgbGrid::new(116, 1)), 3);
        assert_eq!(max_codes(&RgbGrid::new(100, 100)), (10_000 - 80) / 12);
    }
}

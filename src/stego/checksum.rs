//! CRC32 over the code sequence.
//!
//! Each code is folded in as a 16-bit symbol with sixteen bit-serial
//! reduction steps, shifting right against the non-reflected polynomial.
//! This differs from byte-oriented CRC32 and must stay as is: the value is
//! stored in images.

/// Reduction polynomial.
pub const CRC32_POLYNOMIAL: u32 = 0x04C1_1DB7;

/// Bits reduced per code.
const SYMBOL_BITS: u32 = 16;

/// Computes the record checksum for `codes`.
pub fn checksum(codes: &[u16]) -> u32 {
    let crc = codes.iter().fold(u32::MAX, |mut crc, &code| {
        crc ^= u32::from(code);
        for _ in 0..SYMBOL_BITS {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (CRC32_POLYNOMIAL & mask);
        }
        crc
    });
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(checksum(&[65, 256, 65]), 0xFE9F_A616);
        assert_eq!(checksum(&[0]), 0xFC7E_9B20);
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(checksum(&[1, 2, 3]), checksum(&[3, 2, 1]));
    }

    #[test]
    fn test_single_bit_flip_changes_value() {
        let codes: Vec<u16> = (0..500u16).map(|i| (i * 37) % 4096).collect();
        let reference = checksum(&codes);
        for position in [0, 1, 250, 499] {
            for bit in 0..12 {
                let mut flipped = codes.clone();
                flipped[position] ^= 1 << bit;
                assert_ne!(checksum(&flipped), reference, "position {position} bit {bit}");
            }
        }
    }
}

//! # Stegim - hide files inside images
//!
//! Stegim conceals an arbitrary payload in the least significant bit of the
//! blue channel of a 24-bit BMP or PNG image and recovers it later with an
//! integrity check.
//!
//! ## Pipeline
//!
//! - **Hide**: payload bytes → [`lzw::compress`] → 12-bit codes →
//!   [`stego::embed`] → one bit per pixel
//! - **Extract**: pixels → [`stego::extract`] → codes → [`lzw::decompress`]
//!   → payload bytes
//!
//! The embedded record is a 16-bit watermark (`hD`), a 32-bit code count,
//! the codes at 12 bits each and a 32-bit checksum, written most
//! significant bit first with no padding.
//!
//! There is no encryption: the payload is only obscured and checked for
//! damage.
//!
//! ## Example Usage
//!
//! ```rust
//! use stegim::stego::RgbGrid;
//! use stegim::{extract_payload, hide_payload, StegimError};
//!
//! let mut grid = RgbGrid::new(64, 64);
//! hide_payload(b"meet me at noon", &mut grid).unwrap();
//! assert_eq!(extract_payload(&grid).unwrap(), b"meet me at noon");
//!
//! let blank = RgbGrid::new(64, 64);
//! assert!(matches!(extract_payload(&blank), Err(StegimError::NoHiddenContent)));
//! ```
//!
//! ## Modules
//!
//! - [`lzw`]: fixed-width LZW compressor and decompressor
//! - [`stego`]: bit channel, record embedding/extraction, BMP/PNG covers
//! - [`config`]: user configuration file
//! - [`error`]: error taxonomy and exit codes

use tracing::info;

pub mod config;
pub mod error;
pub mod lzw;
pub mod stego;

pub use error::{Result, StegimError};
pub use lzw::{compress, decompress};
pub use stego::checksum::checksum;
pub use stego::{embed, extract, CoverImage, ImageKind, PixelGrid};

/// Compresses `payload` and embeds it into `grid`.
///
/// Returns the number of codes written. The grid is left untouched on
/// error.
pub fn hide_payload<G: PixelGrid + ?Sized>(payload: &[u8], grid: &mut G) -> Result<usize> {
    let codes = compress(payload)?;
    embed(&codes, grid)?;
    info!(
        bytes = payload.len(),
        codes = codes.len(),
        slots = stego::record_bits(codes.len()),
        capacity = grid.slots(),
        "payload hidden"
    );
    Ok(codes.len())
}

/// Extracts, verifies and decompresses the payload hidden in `grid`.
pub fn extract_payload<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u8>> {
    let codes = extract(grid)?;
    let payload = decompress(&codes)?;
    info!(
        codes = codes.len(),
        bytes = payload.len(),
        "payload extracted"
    );
    Ok(payload)
}

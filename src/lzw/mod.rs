//! LZW compression with fixed 12-bit codes.
//!
//! Encoder and decoder each own a fresh [`Dictionary`] per call. Both learn
//! exactly one phrase per emitted code and reset the table at the same
//! point, so no reset marker or side channel is needed in the code stream.

pub mod decoder;
pub mod dictionary;
pub mod encoder;

pub use decoder::decompress;
pub use dictionary::{Dictionary, MAX_ENTRIES, ROOT_ENTRIES};
pub use encoder::compress;

/// Width of one code on the wire, in bits.
pub const CODE_BITS: u32 = 12;

//! Payload bytes to fixed-width LZW codes.

use tracing::debug;

use super::dictionary::Dictionary;
use crate::error::{Result, StegimError};

/// Compresses `data` into a sequence of 12-bit codes.
///
/// The current phrase is extended while the table knows it. When it cannot
/// be extended, its code is emitted, the extension is learned as a new
/// phrase and the unmatched byte seeds the next phrase.
pub fn compress(data: &[u8]) -> Result<Vec<u16>> {
    let (&first, rest) = data
        .split_first()
        .ok_or_else(|| StegimError::InvalidInput("payload is empty".to_string()))?;

    let mut dictionary = Dictionary::new();

    // Never more codes than input bytes.
    let mut codes = Vec::new();
    codes.try_reserve_exact(data.len())?;

    let mut current = Dictionary::root(first);
    for &byte in rest {
        match dictionary.lookup(current, byte) {
            Some(code) => current = code,
            None => {
                codes.push(current);
                dictionary.insert(current, byte);
                current = Dictionary::root(byte);
            }
        }
    }
    codes.push(current);
    codes.shrink_to_fit();

    debug!(
        bytes = data.len(),
        codes = codes.len(),
        resets = dictionary.resets(),
        "payload compressed"
    );

    Ok(codes)
}

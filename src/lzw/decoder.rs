//! Fixed-width LZW codes back to payload bytes.

use std::cmp::Ordering;

use tracing::debug;

use super::dictionary::{Dictionary, ROOT_ENTRIES};
use crate::error::{Result, StegimError};

/// Rebuilds the payload from `codes`.
///
/// The decoder learns phrases one step behind the encoder, using only the
/// codes it has already seen. A code equal to the table size names the
/// phrase the encoder learned on its previous step: the last phrase plus
/// its own first byte. Anything larger cannot have been produced by
/// [`compress`](super::compress) and fails with
/// [`StegimError::DictionaryCorruption`].
pub fn decompress(codes: &[u16]) -> Result<Vec<u8>> {
    let (&first, rest) = codes
        .split_first()
        .ok_or_else(|| StegimError::InvalidInput("code sequence is empty".to_string()))?;

    if usize::from(first) >= ROOT_ENTRIES {
        return Err(StegimError::DictionaryCorruption {
            code: first,
            table_size: ROOT_ENTRIES,
            position: 0,
        });
    }

    let mut dictionary = Dictionary::new();
    let mut output = Vec::new();
    output.try_reserve(codes.len())?;
    output.push(first as u8);

    let mut last = first;
    let mut phrase = Vec::new();

    for (offset, &code) in rest.iter().enumerate() {
        let position = offset + 1;
        let table_size = dictionary.len();

        // A reset leaves only roots behind; a valid stream never carries a
        // learned code across it.
        if usize::from(last) >= table_size {
            return Err(StegimError::DictionaryCorruption {
                code: last,
                table_size,
                position: position - 1,
            });
        }

        phrase.clear();
        match usize::from(code).cmp(&table_size) {
            Ordering::Less => {
                dictionary.resolve_into(code, &mut phrase);
                dictionary.insert(last, phrase[0]);
            }
            Ordering::Equal => {
                dictionary.resolve_into(last, &mut phrase);
                let head = phrase[0];
                phrase.push(head);
                dictionary.insert(last, head);
            }
            Ordering::Greater => {
                return Err(StegimError::DictionaryCorruption {
                    code,
                    table_size,
                    position,
                });
            }
        }

        output.try_reserve(phrase.len())?;
        output.extend_from_slice(&phrase);
        last = code;
    }

    debug!(
        codes = codes.len(),
        bytes = output.len(),
        resets = dictionary.resets(),
        "payload decompressed"
    );

    Ok(output)
}

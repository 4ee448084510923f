//! Phrase table shared by the LZW encoder and decoder.
//!
//! Entries live in a flat arena addressed by code. Codes 0-255 are the
//! single-byte roots; every later entry points at a parent with a lower
//! code, so each phrase is a chain that ends at a root.

use std::collections::HashMap;

use tracing::trace;

/// Number of slots in the table. Codes fit in 12 bits.
pub const MAX_ENTRIES: usize = 4096;

/// Number of single-byte root phrases.
pub const ROOT_ENTRIES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    parent: Option<u16>,
    symbol: u8,
}

/// Fixed-capacity phrase table mapping `(parent, byte)` to a code.
#[derive(Debug)]
pub struct Dictionary {
    entries: Vec<Entry>,
    index: HashMap<(u16, u8), u16>,
    resets: usize,
}

impl Dictionary {
    /// Creates a table holding only the 256 root phrases.
    pub fn new() -> Self {
        let mut dictionary = Self {
            entries: Vec::with_capacity(MAX_ENTRIES),
            index: HashMap::with_capacity(MAX_ENTRIES),
            resets: 0,
        };
        dictionary.initialize();
        dictionary
    }

    /// Drops every learned phrase. The next free code becomes 256.
    pub fn initialize(&mut self) {
        self.entries.clear();
        self.entries.extend((0..=u8::MAX).map(|symbol| Entry {
            parent: None,
            symbol,
        }));
        self.index.clear();
    }

    /// Code of the root phrase for `symbol`.
    pub fn root(symbol: u8) -> u16 {
        u16::from(symbol)
    }

    /// Current table size, which is also the next code to be assigned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the roots survive every reset.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times the table filled up and was reinitialized.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// Returns the code of the phrase `parent` extended by `symbol`.
    pub fn lookup(&self, parent: u16, symbol: u8) -> Option<u16> {
        self.index.get(&(parent, symbol)).copied()
    }

    /// Appends `parent + symbol` at the next free code and returns that code.
    ///
    /// When the table reaches [`MAX_ENTRIES`] it is reinitialized to the
    /// roots right away, so the returned code is no longer addressable.
    /// `parent` must be a code below [`Dictionary::len`].
    pub fn insert(&mut self, parent: u16, symbol: u8) -> u16 {
        debug_assert!(usize::from(parent) < self.entries.len());

        let code = self.entries.len() as u16;
        self.entries.push(Entry {
            parent: Some(parent),
            symbol,
        });
        self.index.insert((parent, symbol), code);

        if self.entries.len() == MAX_ENTRIES {
            self.resets += 1;
            trace!(resets = self.resets, "dictionary full, reinitializing");
            self.initialize();
        }

        code
    }

    /// Appends the phrase for `code` to `out`, first byte first.
    ///
    /// `code` must be below [`Dictionary::len`].
    pub fn resolve_into(&self, code: u16, out: &mut Vec<u8>) {
        let start = out.len();
        let mut cursor = Some(code);
        while let Some(current) = cursor {
            let entry = self.entries[usize::from(current)];
            out.push(entry.symbol);
            cursor = entry.parent;
        }
        out[start..].reverse();
    }

    /// Returns the phrase for `code`.
    #[cfg(test)]
    pub fn resolve(&self, code: u16) -> Vec<u8> {
        let mut phrase = Vec::new();
        self.resolve_into(code, &mut phrase);
        phrase
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_only_roots() {
        let dictionary = Dictionary::new();
        assert_eq!(dictionary.len(), ROOT_ENTRIES);
        assert_eq!(dictionary.resolve(0x41), vec![0x41]);
        assert_eq!(dictionary.lookup(0x41, 0x41), None);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut dictionary = Dictionary::new();
        let code = dictionary.insert(b'A' as u16, b'B');
        assert_eq!(code, 256);
        assert_eq!(dictionary.len(), 257);
        assert_eq!(dictionary.lookup(b'A' as u16, b'B'), Some(256));
        assert_eq!(dictionary.lookup(b'B' as u16, b'A'), None);
    }

    #[test]
    fn test_resolve_walks_chain_in_order() {
        let mut dictionary = Dictionary::new();
        let ab = dictionary.insert(b'a' as u16, b'b');
        let abc = dictionary.insert(ab, b'c');
        let abcd = dictionary.insert(abc, b'd');
        assert_eq!(dictionary.resolve(abcd), b"abcd".to_vec());

        let mut out = b"xy".to_vec();
        dictionary.resolve_into(abc, &mut out);
        assert_eq!(out, b"xyabc".to_vec());
    }

    #[test]
    fn test_reset_when_full() {
        let mut dictionary = Dictionary::new();
        let mut parent = 0u16;
        for i in 0..(MAX_ENTRIES - ROOT_ENTRIES - 1) {
            parent = dictionary.insert(parent, (i % 256) as u8);
        }
        assert_eq!(dictionary.len(), MAX_ENTRIES - 1);
        assert_eq!(dictionary.resets(), 0);

        let last = dictionary.insert(parent, 7);
        assert_eq!(last as usize, MAX_ENTRIES - 1);
        assert_eq!(dictionary.len(), ROOT_ENTRIES);
        assert_eq!(dictionary.resets(), 1);
        assert_eq!(dictionary.lookup(0, 0), None);
        assert_eq!(dictionary.insert(3, 4), 256);
    }
}

//! Token dictionary and substitution-based compression.
//!
//! Each repeated substring gets a short token (`P1`, `P2`, ...) and the text
//! is rewritten by literal find-and-replace, one dictionary entry at a time.
//!
//! Entries are applied in dictionary order. When one key contains or overlaps
//! another, the output depends on that order: replacing `abc` first leaves
//! nothing for `bc` to match, and vice versa. This is an accepted limitation
//! of the scheme; only the order itself is fixed (it follows the
//! [`RepeatSet`] enumeration).

use crate::matcher::find_from;
use crate::repeats::RepeatSet;
use std::io::{self, Write};
use tracing::debug;

/// Token prefix used unless configured otherwise.
pub const DEFAULT_TOKEN_PREFIX: &str = "P";

/// Dictionary construction settings.
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Prepended to the 1-based entry counter to form each token
    pub token_prefix: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            token_prefix: DEFAULT_TOKEN_PREFIX.to_string(),
        }
    }
}

/// A substring and the token standing in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub key: Vec<u8>,
    pub token: String,
}

/// Ordered substring → token mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingDictionary {
    entries: Vec<DictEntry>,
}

impl EncodingDictionary {
    /// Assigns `prefix + n` to each repeat, `n` counting from 1 in set order.
    pub fn build(repeats: &RepeatSet, config: &DictionaryConfig) -> Self {
        let entries = repeats
            .iter()
            .enumerate()
            .map(|(i, (key, _))| DictEntry {
                key: key.to_vec(),
                token: format!("{}{}", config.token_prefix, i + 1),
            })
            .collect();

        Self { entries }
    }

    /// Wraps entries supplied by the caller, in the given order.
    pub fn from_entries(entries: Vec<DictEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    /// Token assigned to `key`, if any.
    pub fn token(&self, key: &[u8]) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.token.as_str())
    }

    /// Replaces every occurrence of every key with its token.
    ///
    /// After each replacement the scan resumes right after the inserted token,
    /// so a token is never searched for the key it replaced.
    pub fn compress(&self, text: &[u8]) -> Vec<u8> {
        let mut current = text.to_vec();
        for entry in &self.entries {
            current = replace_all(&current, &entry.key, entry.token.as_bytes());
        }

        debug!(
            entries = self.entries.len(),
            original = text.len(),
            compressed = current.len(),
            "compressed text"
        );

        current
    }

    /// Restores text produced by [`compress`](Self::compress).
    ///
    /// Tokens are expanded longest first so `P12` is not read as `P1` followed
    /// by `2`. The result equals the original text only when all of these hold:
    ///
    /// - no key overlaps or contains another key,
    /// - no token occurs in the original text,
    /// - no token followed by the bytes after it in the compressed output
    ///   spells a longer token. `P1` followed by a literal `1` reads back as
    ///   `P11` once the dictionary has eleven entries.
    pub fn decompress(&self, compressed: &[u8]) -> Vec<u8> {
        let mut inverse: Vec<&DictEntry> = self.entries.iter().collect();
        inverse.sort_by(|a, b| b.token.len().cmp(&a.token.len()));

        let mut current = compressed.to_vec();
        for entry in inverse {
            current = replace_all(&current, entry.token.as_bytes(), &entry.key);
        }
        current
    }

    /// Writes one `<key> -> <token>` line per entry.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.entries {
            writer.write_all(&entry.key)?;
            writer.write_all(b" -> ")?;
            writer.write_all(entry.token.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Compression statistics for `text` and its compressed form.
    pub fn stats(&self, text: &[u8], compressed: &[u8]) -> CompressionStats {
        CompressionStats {
            original_len: text.len(),
            compressed_len: compressed.len(),
            dictionary_entries: self.entries.len(),
        }
    }
}

/// Literal left-to-right replacement of `from` with `to`.
fn replace_all(text: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(pos) = find_from(text, from, cursor) {
        out.extend_from_slice(&text[cursor..pos]);
        out.extend_from_slice(to);
        cursor = pos + from.len();
    }

    out.extend_from_slice(&text[cursor..]);
    out
}

/// Statistics about the compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Bytes in the input text
    pub original_len: usize,
    /// Bytes after substitution
    pub compressed_len: usize,
    /// Number of dictionary entries
    pub dictionary_entries: usize,
}

impl CompressionStats {
    /// Returns the compression ratio as a percentage.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_len == 0 {
            0.0
        } else {
            (self.compressed_len as f64 / self.original_len as f64) * 100.0
        }
    }
}

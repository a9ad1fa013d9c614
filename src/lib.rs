//! # rollscan - Exact Substring Search and Repeat-Driven Compression
//!
//! Compares two exact substring-search strategies and builds a toy
//! dictionary compressor on top of repeated-substring detection.
//!
//! - **Naive**: compare every candidate window byte by byte.
//! - **Rabin-Karp**: filter windows with a polynomial rolling hash, then
//!   confirm every hash hit by exact comparison.
//!
//! The repeat finder reuses both strategies to count substrings of every
//! length from a minimum up to half the text. Repeated substrings are
//! assigned tokens (`P1`, `P2`, ...) and substituted into the text.
//!
//! ## Example
//!
//! ```
//! use rollscan::{find_all, find_repeats, DictionaryConfig, EncodingDictionary, Strategy};
//!
//! let text = b"ABABABACABABABABACABABABACABABABAC";
//! let offsets = find_all(text, b"ABABABACABABABABAC", &Strategy::default()).unwrap();
//! assert_eq!(offsets, vec![0]);
//!
//! let repeats = find_repeats(b"the cat, the hat", 4, &Strategy::Naive).unwrap();
//! let dictionary = EncodingDictionary::build(&repeats, &DictionaryConfig::default());
//! assert_eq!(dictionary.token(b"the "), Some("P1"));
//! assert_eq!(dictionary.compress(b"the cat, the hat"), b"P1cat, P1hat".to_vec());
//! ```
//!
//! ## Performance
//!
//! - Naive matching: O((n - m + 1) * m)
//! - Rabin-Karp matching: O(n + m) expected, O(n * m) under adversarial collisions
//! - Repeat finding: O(n^3) worst case, with up to O(n^2) counted substrings

mod dictionary;
mod error;
mod matcher;
pub mod pipeline;
mod repeats;
mod rolling;
pub mod timing;

#[cfg(test)]
mod tests;

pub use dictionary::{
    CompressionStats, DictEntry, DictionaryConfig, EncodingDictionary, DEFAULT_TOKEN_PREFIX,
};
pub use error::{Error, Result};
pub use matcher::{find_all, find_from, naive_find_all, rabin_karp_find_all, Strategy};
pub use repeats::{find_repeats, RepeatIter, RepeatSet};
pub use rolling::{HashParams, RollingHash};

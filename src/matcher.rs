//! Exact substring search.
//!
//! Two interchangeable strategies with the same contract: every start offset
//! at which `pattern` occurs in `text`, in increasing order.

use crate::error::{Error, Result};
use crate::rolling::{HashParams, RollingHash};
use std::fmt;
use tracing::trace;

/// Matching strategy shared by [`find_all`] and [`crate::find_repeats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Compare every candidate window byte by byte.
    Naive,
    /// Pre-filter candidate windows with a rolling hash.
    RabinKarp(HashParams),
}

impl Strategy {
    /// Rabin-Karp with the default base and a caller-chosen prime.
    pub fn rabin_karp(modulus: u64) -> Result<Self> {
        Ok(Strategy::RabinKarp(HashParams::with_modulus(modulus)?))
    }

    /// Short name used in file names and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::RabinKarp(_) => "rabin_karp",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::RabinKarp(HashParams::default())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Naive => write!(f, "Naive String Matching"),
            Strategy::RabinKarp(params) => {
                write!(f, "Rabin-Karp (prime = {})", params.modulus())
            }
        }
    }
}

/// Finds every offset where `pattern` occurs in `text`.
///
/// Returns [`Error::EmptyPattern`] for an empty pattern. A pattern longer than
/// the text yields no matches.
///
/// # Example
///
/// ```
/// use rollscan::{find_all, Strategy};
///
/// let offsets = find_all(b"THIS IS AN EXAMPLE.", b"EX", &Strategy::Naive).unwrap();
/// assert_eq!(offsets, vec![11]);
/// ```
pub fn find_all(text: &[u8], pattern: &[u8], strategy: &Strategy) -> Result<Vec<usize>> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }

    let matches = match strategy {
        Strategy::Naive => naive_find_all(text, pattern),
        Strategy::RabinKarp(params) => rabin_karp_find_all(text, pattern, *params),
    };

    trace!(
        strategy = strategy.name(),
        text_len = text.len(),
        pattern_len = pattern.len(),
        matches = matches.len(),
        "find_all"
    );

    Ok(matches)
}

/// Brute-force scan. `pattern` must be non-empty.
pub fn naive_find_all(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    let m = pattern.len();
    if m > text.len() {
        return Vec::new();
    }

    (0..=text.len() - m)
        .filter(|&i| matches_at(text, pattern, i))
        .collect()
}

/// Rolling-hash scan. `pattern` must be non-empty.
///
/// Windows whose hash equals the pattern hash are confirmed byte by byte, so a
/// collision never produces a reported match.
pub fn rabin_karp_find_all(text: &[u8], pattern: &[u8], params: HashParams) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();
    let mut matches = Vec::new();
    if m > n {
        return matches;
    }

    let pattern_hash = params.hash(pattern);
    let mut window = RollingHash::new(params, &text[..m]);

    for i in 0..=n - m {
        if window.value() == pattern_hash && &text[i..i + m] == pattern {
            matches.push(i);
        }

        if i < n - m {
            window.roll(text[i], text[i + m]);
        }
    }

    matches
}

/// First occurrence of `pattern` at or after `start`, by brute force.
pub fn find_from(text: &[u8], pattern: &[u8], start: usize) -> Option<usize> {
    let m = pattern.len();
    if m == 0 || start > text.len() || m > text.len() - start {
        return None;
    }

    (start..=text.len() - m).find(|&i| matches_at(text, pattern, i))
}

/// Byte comparison with early exit on the first mismatch.
#[inline]
fn matches_at(text: &[u8], pattern: &[u8], offset: usize) -> bool {
    pattern
        .iter()
        .zip(&text[offset..])
        .all(|(p, t)| p == t)
}

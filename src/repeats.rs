//! Repeated-substring detection.
//!
//! Scans every window length from a minimum up to half the text and counts
//! the exact content of each window. Substrings seen more than once form the
//! [`RepeatSet`].
//!
//! Under [`Strategy::RabinKarp`] the scan uses a *first-window-anchored
//! rolling filter*: at each length, only windows whose rolling hash equals the
//! hash of the first window at that length are counted. This is an
//! approximate detector. It never reports a false repeat, but it misses
//! repeats that do not hash like the first window.

use crate::error::{Error, Result};
use crate::matcher::Strategy;
use crate::rolling::{HashParams, RollingHash};
use ahash::AHashMap as HashMap;
use std::collections::btree_map;
use std::collections::BTreeMap;
use tracing::debug;

/// Repeated substrings and how often each occurs.
///
/// Substrings are owned copies, enumerated in lexicographic byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatSet {
    entries: BTreeMap<Vec<u8>, usize>,
}

impl RepeatSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct repeated substrings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence count of `substring`, if it is a repeat.
    pub fn count(&self, substring: &[u8]) -> Option<usize> {
        self.entries.get(substring).copied()
    }

    pub fn contains(&self, substring: &[u8]) -> bool {
        self.entries.contains_key(substring)
    }

    /// Iterates `(substring, count)` in lexicographic order.
    pub fn iter(&self) -> RepeatIter<'_> {
        RepeatIter {
            inner: self.entries.iter(),
        }
    }

    /// Entries ordered by count descending, then longer substrings first.
    pub fn by_frequency(&self) -> Vec<(&[u8], usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.len().cmp(&a.0.len())));
        ranked
    }
}

/// Iterator over a [`RepeatSet`].
pub struct RepeatIter<'a> {
    inner: btree_map::Iter<'a, Vec<u8>, usize>,
}

impl<'a> Iterator for RepeatIter<'a> {
    type Item = (&'a [u8], usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, &v)| (k.as_slice(), v))
    }
}

impl<'a> IntoIterator for &'a RepeatSet {
    type Item = (&'a [u8], usize);
    type IntoIter = RepeatIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Finds substrings of length `min_length..=text.len() / 2` occurring more than once.
///
/// # Example
///
/// ```
/// use rollscan::{find_repeats, Strategy};
///
/// let repeats = find_repeats(b"abcXabcY", 3, &Strategy::Naive).unwrap();
/// assert_eq!(repeats.count(b"abc"), Some(2));
/// ```
pub fn find_repeats(text: &[u8], min_length: usize, strategy: &Strategy) -> Result<RepeatSet> {
    if min_length == 0 {
        return Err(Error::InvalidMinLength { min_length });
    }

    let mut counts: HashMap<&[u8], usize> = HashMap::default();
    let max_length = text.len() / 2;

    for length in min_length..=max_length {
        match strategy {
            Strategy::Naive => count_all_windows(text, length, &mut counts),
            Strategy::RabinKarp(params) => {
                count_anchored_windows(text, length, *params, &mut counts)
            }
        }
    }

    let scanned = counts.len();
    let entries: BTreeMap<Vec<u8>, usize> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(substring, count)| (substring.to_vec(), count))
        .collect();

    debug!(
        strategy = strategy.name(),
        text_len = text.len(),
        min_length,
        distinct_windows = scanned,
        repeats = entries.len(),
        "repeat scan finished"
    );

    Ok(RepeatSet { entries })
}

/// Counts every window of `length`.
fn count_all_windows<'t>(text: &'t [u8], length: usize, counts: &mut HashMap<&'t [u8], usize>) {
    for window in text.windows(length) {
        *counts.entry(window).or_insert(0) += 1;
    }
}

/// Counts only windows hashing like the first window of `length`.
fn count_anchored_windows<'t>(
    text: &'t [u8],
    length: usize,
    params: HashParams,
    counts: &mut HashMap<&'t [u8], usize>,
) {
    let n = text.len();
    let mut rolling = RollingHash::new(params, &text[..length]);
    let anchor = rolling.value();

    for i in 0..=n - length {
        if rolling.value() == anchor {
            *counts.entry(&text[i..i + length]).or_insert(0) += 1;
        }

        if i < n - length {
            rolling.roll(text[i], text[i + length]);
        }
    }
}

//! Polynomial rolling hash over byte windows.
//!
//! A window `w[0..m]` hashes to `(w[0]*B^(m-1) + ... + w[m-1]) mod P`. Advancing
//! the window by one byte removes the leading term, shifts by `B` and adds the
//! trailing byte, all in O(1) using the precomputed `B^(m-1) mod P`.
//!
//! Equal hashes do not imply equal windows. Anything that reports a match on
//! the strength of a hash must confirm it by comparing bytes.

use crate::error::{Error, Result};

/// Base and prime modulus of the polynomial hash.
///
/// The defaults (`256`, `101`) treat every byte value as a digit and use a
/// small prime. Other primes change how often collisions happen, not which
/// matches are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    base: u64,
    modulus: u64,
}

impl HashParams {
    /// One digit per byte value.
    pub const DEFAULT_BASE: u64 = 256;
    /// Small prime used unless the caller picks another.
    pub const DEFAULT_MODULUS: u64 = 101;

    /// Creates validated parameters.
    ///
    /// Every intermediate value in a rolling update is bounded by
    /// `(modulus - 1) * max(base, 255) + 255`, which must fit in a `u64`.
    /// With the default base this allows moduli up to roughly `2^56`.
    pub fn new(base: u64, modulus: u64) -> Result<Self> {
        if base < 2 || modulus < 2 {
            return Err(Error::InvalidHashParams { base, modulus });
        }

        (modulus - 1)
            .checked_mul(base.max(u8::MAX as u64))
            .and_then(|v| v.checked_add(u8::MAX as u64))
            .ok_or(Error::HashOverflow { base, modulus })?;

        Ok(Self { base, modulus })
    }

    /// Default base with a caller-chosen prime.
    pub fn with_modulus(modulus: u64) -> Result<Self> {
        Self::new(Self::DEFAULT_BASE, modulus)
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Hashes a whole slice from scratch.
    pub fn hash(&self, bytes: &[u8]) -> u64 {
        bytes.iter().fold(0, |acc, &b| self.push(acc, b))
    }

    /// `base^(len-1) mod modulus`, the weight of a window's leading byte.
    pub fn leading_weight(&self, len: usize) -> u64 {
        let mut h = 1u64;
        for _ in 1..len {
            h = (h * self.base) % self.modulus;
        }
        h
    }

    #[inline]
    fn push(&self, acc: u64, byte: u8) -> u64 {
        (acc * self.base + byte as u64) % self.modulus
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            modulus: Self::DEFAULT_MODULUS,
        }
    }
}

/// Hash of a fixed-length window sliding over a byte slice.
#[derive(Debug, Clone)]
pub struct RollingHash {
    params: HashParams,
    /// Hash of the current window
    value: u64,
    /// `base^(window_len-1) mod modulus`
    leading_weight: u64,
    window_len: usize,
}

impl RollingHash {
    /// Hashes the initial window. The window must not be empty.
    pub fn new(params: HashParams, window: &[u8]) -> Self {
        debug_assert!(!window.is_empty(), "rolling window must not be empty");

        Self {
            params,
            value: params.hash(window),
            leading_weight: params.leading_weight(window.len()),
            window_len: window.len(),
        }
    }

    /// Current window hash, always in `0..modulus`.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Slides the window one byte to the right.
    ///
    /// `outgoing` must be the first byte of the current window and `incoming`
    /// the byte just past its end.
    #[inline]
    pub fn roll(&mut self, outgoing: u8, incoming: u8) {
        let p = self.params.modulus;
        let lead = (outgoing as u64 * self.leading_weight) % p;

        // Add P back before subtracting so the residue never goes negative.
        let without_lead = (self.value + p - lead) % p;
        self.value = self.params.push(without_lead, incoming);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = HashParams::default();
        assert_eq!(params.base(), 256);
        assert_eq!(params.modulus(), 101);
    }

    #[test]
    fn test_rejects_degenerate_params() {
        assert!(matches!(
            HashParams::new(1, 101),
            Err(Error::InvalidHashParams { .. })
        ));
        assert!(matches!(
            HashParams::new(256, 0),
            Err(Error::InvalidHashParams { .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_params() {
        assert!(matches!(
            HashParams::with_modulus(u64::MAX),
            Err(Error::HashOverflow { .. })
        ));
        assert!(HashParams::with_modulus((1 << 55) + 1).is_ok());
    }

    #[test]
    fn test_hash_matches_polynomial() {
        let params = HashParams::default();
        // ('A' * 256 + 'B') mod 101 = (65 * 256 + 66) mod 101
        assert_eq!(params.hash(b"AB"), (65 * 256 + 66) % 101);
        assert_eq!(params.hash(b""), 0);
    }

    #[test]
    fn test_leading_weight() {
        let params = HashParams::default();
        assert_eq!(params.leading_weight(1), 1);
        assert_eq!(params.leading_weight(2), 256 % 101);
        assert_eq!(params.leading_weight(3), (256 * 256) % 101);
    }

    #[test]
    fn test_roll_equals_fresh_hash() {
        let text = b"THIS IS A SIMPLE EXAMPLE";
        for &modulus in &[101, 211, 307, 1_000_000_007] {
            let params = HashParams::with_modulus(modulus).unwrap();
            for len in 1..8 {
                let mut rolling = RollingHash::new(params, &text[..len]);
                assert_eq!(rolling.window_len(), len);
                for i in 1..=text.len() - len {
                    rolling.roll(text[i - 1], text[i + len - 1]);
                    assert_eq!(rolling.value(), params.hash(&text[i..i + len]));
                }
                assert_eq!(rolling.window_len(), len);
            }
        }
    }

    #[test]
    fn test_roll_stays_in_range_for_high_bytes() {
        let text = [0xFFu8, 0x00, 0xFE, 0x01, 0x80, 0x7F, 0xFF, 0xFF];
        let params = HashParams::with_modulus(7).unwrap();
        let mut rolling = RollingHash::new(params, &text[..3]);
        for i in 1..=text.len() - 3 {
            rolling.roll(text[i - 1], text[i + 2]);
            assert!(rolling.value() < 7);
            assert_eq!(rolling.value(), params.hash(&text[i..i + 3]));
        }
    }
}

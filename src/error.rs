//! Error types for matching, repeat scanning and the file pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by `rollscan`.
#[derive(Debug, Error)]
pub enum Error {
    /// Searching for an empty pattern is not defined.
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// Repeat scanning needs windows of at least one byte.
    #[error("invalid minimum length {min_length}: must be at least 1")]
    InvalidMinLength { min_length: usize },

    /// Base or modulus too small to form a polynomial hash.
    #[error("invalid hash parameters: base {base} and modulus {modulus} must both be >= 2")]
    InvalidHashParams { base: u64, modulus: u64 },

    /// Rolling updates for this base/modulus pair would overflow `u64`.
    #[error("hash parameters overflow u64: base {base} * modulus {modulus} is too large")]
    HashOverflow { base: u64, modulus: u64 },

    /// The pipeline input file does not exist.
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// I/O error while reading input or writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for `lesspass-core`.

use thiserror::Error;

/// Errors produced while resolving a profile or deriving a password.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LessPassError {
    /// The profile names a digest other than `sha256` or `sha512`.
    #[error("unsupported digest: {0} (expected sha256 or sha512)")]
    UnsupportedDigest(String),

    /// Every character class is disabled, so there is nothing to sample from.
    #[error("character pool is empty: enable at least one character class")]
    EmptyCharacterPool,

    /// Requested length cannot hold one character per enabled class.
    #[error("invalid length: {length} is shorter than the {required} enabled character classes")]
    InvalidLength {
        /// Requested password length.
        length: usize,
        /// Number of enabled character classes.
        required: usize,
    },

    /// A profile value has the wrong type or is out of range.
    #[error("invalid profile value: {0}")]
    InvalidProfileValue(String),

    /// The entropy string is not a hexadecimal number.
    #[error("malformed entropy: {0}")]
    MalformedEntropy(String),
}

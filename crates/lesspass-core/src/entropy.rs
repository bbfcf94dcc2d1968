//! PBKDF2 entropy derivation.
//!
//! This module provides:
//! - [`derive_entropy`]: stretch the master password into a hex entropy string
//! - [`build_salt`]: the `site || login || hex(counter)` salt
//! - [`Entropy`]: the derived hex string, masked in `Debug` and zeroized on drop

use std::fmt;

use data_encoding::HEXLOWER;
use num_bigint::BigUint;
use ring::pbkdf2;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::LessPassError;
use crate::profile::Profile;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Hex-encoded PBKDF2 output, read as one big non-negative integer.
///
/// Holds `keylen * 2` lowercase hex digits. `Debug` output is masked
/// (`Entropy(***)`) and the string is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    hex: String,
}

impl Entropy {
    /// The lowercase hex digits.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Number of hex digits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    /// Whether the entropy holds no digits (never true for derived entropy).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }

    /// Interpret the hex digits as a big-endian integer.
    ///
    /// # Errors
    ///
    /// Returns [`LessPassError::MalformedEntropy`] if `hex` is empty or holds
    /// a non-hex character.
    pub fn parse_hex(hex: &str) -> Result<BigUint, LessPassError> {
        if hex.is_empty() {
            return Err(LessPassError::MalformedEntropy("entropy is empty".into()));
        }
        if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(LessPassError::MalformedEntropy(format!(
                "unexpected character {bad:?} in entropy"
            )));
        }
        BigUint::parse_bytes(hex.as_bytes(), 16).ok_or_else(|| {
            LessPassError::MalformedEntropy("entropy is not a hexadecimal number".into())
        })
    }

    /// This entropy as a big integer.
    ///
    /// # Errors
    ///
    /// Never fails for entropy built by [`derive_entropy`]; see [`Entropy::parse_hex`].
    pub fn to_biguint(&self) -> Result<BigUint, LessPassError> {
        Self::parse_hex(&self.hex)
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Entropy(***)")
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Salt for one site/login/counter triple: the plain concatenation of `site`,
/// `login` and `counter` in lowercase hex without padding or prefix.
#[must_use]
pub fn build_salt(site: &str, login: &str, counter: u64) -> String {
    format!("{site}{login}{counter:x}")
}

/// Derive the entropy for a site from the master password.
///
/// Runs PBKDF2 with HMAC-`profile.digest`, `profile.iterations` rounds and a
/// `profile.keylen`-byte output, salted with [`build_salt`]. The raw key is
/// zeroized once hex-encoded.
///
/// # Errors
///
/// Returns [`LessPassError::InvalidProfileValue`] if `iterations` or `keylen`
/// is zero.
pub fn derive_entropy(
    site: &str,
    login: &str,
    master_password: &str,
    profile: &Profile,
) -> Result<Entropy, LessPassError> {
    let iterations = profile.iteration_count()?;
    if profile.keylen == 0 {
        return Err(LessPassError::InvalidProfileValue(
            "keylen must be a positive integer".into(),
        ));
    }

    tracing::debug!(
        digest = %profile.digest,
        iterations = profile.iterations,
        keylen = profile.keylen,
        "deriving entropy"
    );

    let salt = build_salt(site, login, profile.counter);
    let mut key = Zeroizing::new(vec![0u8; profile.keylen]);
    pbkdf2::derive(
        profile.digest.pbkdf2_algorithm(),
        iterations,
        salt.as_bytes(),
        master_password.as_bytes(),
        &mut key,
    );

    Ok(Entropy {
        hex: HEXLOWER.encode(&key),
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

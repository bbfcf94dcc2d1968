//! Password profiles: the formatting and derivation options for one site.
//!
//! This module provides:
//! - [`Profile`]: fully resolved, typed options with LessPass defaults
//! - [`ProfileOverrides`]: the open mapping form, every key optional
//! - [`resolve_profile`]: merge overrides over the defaults and validate
//! - [`Digest`]: the PBKDF2 pseudorandom function selector

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use ring::pbkdf2;
use serde::{Deserialize, Serialize};

use crate::charset::CharacterClass;
use crate::error::LessPassError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Default derived key length in bytes.
pub const DEFAULT_KEYLEN: usize = 32;

/// Default password length.
pub const DEFAULT_LENGTH: usize = 16;

/// Default counter.
pub const DEFAULT_COUNTER: u64 = 1;

/// The only algorithm version this crate renders.
pub const SUPPORTED_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Hash function behind the PBKDF2 HMAC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Digest {
    /// HMAC-SHA256.
    #[default]
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl Digest {
    /// Name used in profiles.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Map to the corresponding `ring::pbkdf2::Algorithm`.
    pub(crate) fn pbkdf2_algorithm(self) -> pbkdf2::Algorithm {
        match self {
            Self::Sha256 => pbkdf2::PBKDF2_HMAC_SHA256,
            Self::Sha512 => pbkdf2::PBKDF2_HMAC_SHA512,
        }
    }
}

impl FromStr for Digest {
    type Err = LessPassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(LessPassError::UnsupportedDigest(other.to_string())),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Fully resolved password profile.
///
/// All fields have LessPass defaults via [`Default`]; missing keys in a
/// serialized profile take the same defaults.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Include `a-z`.
    #[serde(default = "enabled")]
    pub lowercase: bool,
    /// Include `A-Z`.
    #[serde(default = "enabled")]
    pub uppercase: bool,
    /// Include `0-9`.
    #[serde(default = "enabled")]
    pub numbers: bool,
    /// Include punctuation.
    #[serde(default = "enabled")]
    pub symbols: bool,
    /// PBKDF2 HMAC digest.
    #[serde(default)]
    pub digest: Digest,
    /// PBKDF2 iteration count.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Derived key length in bytes, before hex encoding.
    #[serde(default = "default_keylen")]
    pub keylen: usize,
    /// Final password length.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Distinguishes several passwords for the same site and login.
    #[serde(default = "default_counter")]
    pub counter: u64,
    /// Algorithm version tag.
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            lowercase: true,
            uppercase: true,
            numbers: true,
            symbols: true,
            digest: Digest::default(),
            iterations: DEFAULT_ITERATIONS,
            keylen: DEFAULT_KEYLEN,
            length: DEFAULT_LENGTH,
            counter: DEFAULT_COUNTER,
            version: SUPPORTED_VERSION,
        }
    }
}

const fn enabled() -> bool {
    true
}
const fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}
const fn default_keylen() -> usize {
    DEFAULT_KEYLEN
}
const fn default_length() -> usize {
    DEFAULT_LENGTH
}
const fn default_counter() -> u64 {
    DEFAULT_COUNTER
}
const fn default_version() -> u32 {
    SUPPORTED_VERSION
}

impl Profile {
    /// Whether `class` is switched on in this profile.
    #[must_use]
    pub const fn includes(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Numbers => self.numbers,
            CharacterClass::Symbols => self.symbols,
        }
    }

    /// Enabled classes in canonical order (lowercase, uppercase, numbers, symbols).
    #[must_use]
    pub fn enabled_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.includes(*class))
            .collect()
    }

    /// Iteration count as the non-zero type PBKDF2 expects.
    ///
    /// # Errors
    ///
    /// Returns [`LessPassError::InvalidProfileValue`] if `iterations` is zero.
    pub fn iteration_count(&self) -> Result<NonZeroU32, LessPassError> {
        NonZeroU32::new(self.iterations).ok_or_else(|| {
            LessPassError::InvalidProfileValue("iterations must be a positive integer".into())
        })
    }

    /// Check that the profile can drive a full derivation.
    ///
    /// # Errors
    ///
    /// - [`LessPassError::InvalidProfileValue`] if `iterations`, `keylen`,
    ///   `length` or `counter` is zero, or `version` is not 2
    /// - [`LessPassError::EmptyCharacterPool`] if every class is disabled
    /// - [`LessPassError::InvalidLength`] if `length` is below the number of
    ///   enabled classes
    pub fn validate(&self) -> Result<(), LessPassError> {
        self.iteration_count()?;
        for (key, value) in [
            ("keylen", self.keylen),
            ("length", self.length),
        ] {
            if value == 0 {
                return Err(LessPassError::InvalidProfileValue(format!(
                    "{key} must be a positive integer"
                )));
            }
        }
        if self.counter == 0 {
            return Err(LessPassError::InvalidProfileValue(
                "counter must be a positive integer".into(),
            ));
        }
        if self.version != SUPPORTED_VERSION {
            return Err(LessPassError::InvalidProfileValue(format!(
                "version {} is not supported (only version {SUPPORTED_VERSION})",
                self.version
            )));
        }

        let required = self.enabled_classes().len();
        if required == 0 {
            return Err(LessPassError::EmptyCharacterPool);
        }
        if self.length < required {
            return Err(LessPassError::InvalidLength {
                length: self.length,
                required,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Caller-supplied profile options. Absent keys fall back to the defaults.
///
/// Deserializes from the JSON mapping form, e.g. `{"length": 14, "symbols": false}`.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<bool>,
    /// Digest name; checked against [`Digest`] during resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keylen: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl ProfileOverrides {
    /// Parse overrides from a JSON object. `null` means "no overrides".
    ///
    /// # Errors
    ///
    /// Returns [`LessPassError::InvalidProfileValue`] for malformed JSON,
    /// unknown keys or values of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, LessPassError> {
        serde_json::from_str::<Option<Self>>(json)
            .map(Option::unwrap_or_default)
            .map_err(|e| LessPassError::InvalidProfileValue(e.to_string()))
    }

    /// Same as [`ProfileOverrides::from_json`], from an already parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`LessPassError::InvalidProfileValue`] for unknown keys or
    /// values of the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, LessPassError> {
        serde_json::from_value::<Option<Self>>(value)
            .map(Option::unwrap_or_default)
            .map_err(|e| LessPassError::InvalidProfileValue(e.to_string()))
    }

    /// Apply these overrides on top of `base`. Explicit keys win.
    ///
    /// # Errors
    ///
    /// Returns [`LessPassError::UnsupportedDigest`] if `digest` is set to
    /// anything other than `sha256` or `sha512`.
    pub fn apply(&self, base: Profile) -> Result<Profile, LessPassError> {
        let digest = match self.digest.as_deref() {
            Some(name) => name.parse()?,
            None => base.digest,
        };
        Ok(Profile {
            lowercase: self.lowercase.unwrap_or(base.lowercase),
            uppercase: self.uppercase.unwrap_or(base.uppercase),
            numbers: self.numbers.unwrap_or(base.numbers),
            symbols: self.symbols.unwrap_or(base.symbols),
            digest,
            iterations: self.iterations.unwrap_or(base.iterations),
            keylen: self.keylen.unwrap_or(base.keylen),
            length: self.length.unwrap_or(base.length),
            counter: self.counter.unwrap_or(base.counter),
            version: self.version.unwrap_or(base.version),
        })
    }
}

/// Merge `overrides` over the default profile and validate the result.
///
/// `None` yields the defaults.
///
/// # Errors
///
/// Returns [`LessPassError::UnsupportedDigest`] for an unknown digest name and
/// any error of [`Profile::validate`].
pub fn resolve_profile(overrides: Option<&ProfileOverrides>) -> Result<Profile, LessPassError> {
    let profile = match overrides {
        Some(overrides) => overrides.apply(Profile::default())?,
        None => Profile::default(),
    };
    profile.validate()?;
    Ok(profile)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

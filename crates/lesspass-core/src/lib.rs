//! `lesspass-core`: stateless site password derivation.
//!
//! The same site, login, master password and profile always produce the same
//! password, so nothing needs to be stored. Pure functions only: zero I/O,
//! zero async, zero global state.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod charset;
pub mod profile;

pub mod entropy;
pub mod render;

pub use charset::{character_pool, class_pool, CharacterClass};
pub use entropy::{build_salt, derive_entropy, Entropy};
pub use error::LessPassError;
pub use profile::{resolve_profile, Digest, Profile, ProfileOverrides};
pub use render::{consume_entropy, insert_pseudorandomly, one_char_per_rule, render_password};

/// Derive the password for `site` and `login` from `master_password`.
///
/// `overrides` are merged over the default profile (see [`resolve_profile`]);
/// `None` uses the defaults. The profile is validated before any PBKDF2 work.
///
/// # Errors
///
/// Any error of [`resolve_profile`] or [`render_password`].
pub fn generate_password(
    site: &str,
    login: &str,
    master_password: &str,
    overrides: Option<&ProfileOverrides>,
) -> Result<String, LessPassError> {
    let profile = resolve_profile(overrides)?;
    derive_password(site, login, master_password, &profile)
}

/// Same as [`generate_password`] for an already resolved profile.
///
/// # Errors
///
/// Any error of [`Profile::validate`] or [`render_password`].
pub fn derive_password(
    site: &str,
    login: &str,
    master_password: &str,
    profile: &Profile,
) -> Result<String, LessPassError> {
    profile.validate()?;
    tracing::debug!(
        length = profile.length,
        counter = profile.counter,
        classes = ?profile.enabled_classes(),
        "generating password"
    );
    let entropy = derive_entropy(site, login, master_password, profile)?;
    render_password(entropy.as_hex(), profile)
}

//! Deterministic password rendering from entropy.
//!
//! The entropy integer is read as a numeral in base `pool.len()`, least
//! significant digit first: each division by the pool size yields the next
//! character as its remainder and keeps the quotient for later steps.
//!
//! Rendering runs in three stages that share one shrinking quotient:
//! 1. [`consume_entropy`] fills `length - classes` characters from the combined pool
//! 2. [`one_char_per_rule`] draws one mandatory character from each enabled class
//! 3. [`insert_pseudorandomly`] splices the mandatory characters into the base

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;
use zeroize::Zeroizing;

use crate::charset::{class_pool, CharacterClass};
use crate::entropy::Entropy;
use crate::error::LessPassError;
use crate::profile::{Profile, SUPPORTED_VERSION};

/// Divide `value` by `radix`, returning the quotient and the remainder as an index.
///
/// `radix` must be non-zero.
fn div_rem_index(value: &BigUint, radix: usize) -> (BigUint, usize) {
    let (quotient, remainder) = value.div_rem(&BigUint::from(radix));
    // remainder < radix, so it always fits
    (quotient, remainder.to_usize().unwrap_or_default())
}

/// Append characters drawn from `pool` to `prefix` until it holds
/// `target_length` characters.
///
/// Returns the password and the quotient left after the last division. A
/// prefix that already reaches `target_length` is returned untouched along
/// with the unconsumed quotient.
///
/// # Errors
///
/// Returns [`LessPassError::EmptyCharacterPool`] if a character is needed and
/// `pool` is empty.
pub fn consume_entropy(
    prefix: &str,
    quotient: BigUint,
    pool: &str,
    target_length: usize,
) -> Result<(String, BigUint), LessPassError> {
    let missing = target_length.saturating_sub(prefix.chars().count());
    let mut password = prefix.to_owned();
    if missing == 0 {
        return Ok((password, quotient));
    }

    let pool: Vec<char> = pool.chars().collect();
    if pool.is_empty() {
        return Err(LessPassError::EmptyCharacterPool);
    }

    let mut quotient = quotient;
    for _ in 0..missing {
        let (next, index) = div_rem_index(&quotient, pool.len());
        password.push(pool[index]);
        quotient = next;
    }
    Ok((password, quotient))
}

/// Draw one character from each class's own subset, in the order given.
///
/// Returns the drawn characters and the remaining quotient.
#[must_use]
pub fn one_char_per_rule(entropy: BigUint, classes: &[CharacterClass]) -> (String, BigUint) {
    let mut chars = String::with_capacity(classes.len());
    let mut quotient = entropy;
    for class in classes {
        let charset = class.charset().as_bytes();
        let (next, index) = div_rem_index(&quotient, charset.len());
        chars.push(char::from(charset[index]));
        quotient = next;
    }
    (chars, quotient)
}

/// Insert each character of `extra` into `base` at a position taken from `entropy`.
///
/// For every character the insertion index is `entropy mod len(base)` over the
/// current, growing base; the quotient carries on to the next character.
/// Inserting into an empty base places the character at index 0 and
/// consumes no entropy.
#[must_use]
pub fn insert_pseudorandomly(base: &str, entropy: BigUint, extra: &str) -> String {
    let mut chars: Vec<char> = base.chars().collect();
    chars.reserve(extra.chars().count());
    let mut quotient = entropy;
    for ch in extra.chars() {
        if chars.is_empty() {
            chars.push(ch);
            continue;
        }
        let (next, index) = div_rem_index(&quotient, chars.len());
        chars.insert(index, ch);
        quotient = next;
    }
    chars.into_iter().collect()
}

/// Render the final password for `profile` from hex `entropy`.
///
/// The result is exactly `profile.length` characters long and contains at
/// least one character of every enabled class.
///
/// # Errors
///
/// - [`LessPassError::EmptyCharacterPool`] if every class is disabled
/// - [`LessPassError::InvalidLength`] if `length` is below the number of enabled classes
/// - [`LessPassError::InvalidProfileValue`] if `version` is not 2
/// - [`LessPassError::MalformedEntropy`] if `entropy` is not hexadecimal
pub fn render_password(entropy: &str, profile: &Profile) -> Result<String, LessPassError> {
    if profile.version != SUPPORTED_VERSION {
        return Err(LessPassError::InvalidProfileValue(format!(
            "version {} is not supported (only version {SUPPORTED_VERSION})",
            profile.version
        )));
    }

    let classes = profile.enabled_classes();
    if classes.is_empty() {
        return Err(LessPassError::EmptyCharacterPool);
    }
    let base_length = profile.length.checked_sub(classes.len()).ok_or(LessPassError::InvalidLength {
        length: profile.length,
        required: classes.len(),
    })?;

    let pool = class_pool(&classes);
    let quotient = Entropy::parse_hex(entropy)?;

    let (base, quotient) = consume_entropy("", quotient, &pool, base_length)?;
    let base = Zeroizing::new(base);
    let (extra, quotient) = one_char_per_rule(quotient, &classes);
    let extra = Zeroizing::new(extra);

    Ok(insert_pseudorandomly(&base, quotient, &extra))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

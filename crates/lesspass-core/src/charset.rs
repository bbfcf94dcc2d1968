//! Character classes and pool assembly.
//!
//! The order of characters inside each subset, and the canonical order of
//! the classes themselves, decide which character a division remainder
//! maps to. Changing either changes every derived password.

use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowercase ASCII letters (26).
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters (26).
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits (10).
pub const NUMBERS: &str = "0123456789";

/// Printable ASCII punctuation (32).
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One of the four character classes a profile can enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// `a-z`
    Lowercase,
    /// `A-Z`
    Uppercase,
    /// `0-9`
    Numbers,
    /// Punctuation, see [`SYMBOLS`].
    Symbols,
}

impl CharacterClass {
    /// Every class, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::Lowercase,
        Self::Uppercase,
        Self::Numbers,
        Self::Symbols,
    ];

    /// Characters belonging to this class, in positional order.
    #[must_use]
    pub const fn charset(self) -> &'static str {
        match self {
            Self::Lowercase => LOWERCASE,
            Self::Uppercase => UPPERCASE,
            Self::Numbers => NUMBERS,
            Self::Symbols => SYMBOLS,
        }
    }

    /// Profile key naming this class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::Numbers => "numbers",
            Self::Symbols => "symbols",
        }
    }

    /// Look a class up by its profile key. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Pool assembly
// ---------------------------------------------------------------------------

/// Concatenate the subsets of the named classes, in the order given.
///
/// An empty list selects all four classes in canonical order. Unrecognized
/// names are skipped. Repeated names contribute their subset once per
/// occurrence.
#[must_use]
pub fn character_pool<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return class_pool(&CharacterClass::ALL);
    }
    names
        .iter()
        .filter_map(|name| CharacterClass::from_name(name.as_ref()))
        .map(CharacterClass::charset)
        .collect()
}

/// Typed counterpart of [`character_pool`]: an empty slice yields an empty pool.
#[must_use]
pub fn class_pool(classes: &[CharacterClass]) -> String {
    classes.iter().copied().map(CharacterClass::charset).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

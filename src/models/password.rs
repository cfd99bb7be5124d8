//! Password generator model
//!
//! Character classes, the flag set selecting them, and the generated
//! password itself. Generated passwords live in a [`SecretString`] that is
//! zeroed when dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Printable ASCII punctuation, 32 characters
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A class of characters that can be included in a password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    /// All classes in the fixed order used to assemble a charset
    pub const ORDER: [CharClass; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Symbol];

    /// Characters belonging to this class
    pub fn chars(&self) -> &'static str {
        match self {
            Self::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::Lower => "abcdefghijklmnopqrstuvwxyz",
            Self::Digit => "0123456789",
            Self::Symbol => SYMBOLS,
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Self::Upper => 0b0001,
            Self::Lower => 0b0010,
            Self::Digit => 0b0100,
            Self::Symbol => 0b1000,
        }
    }
}

/// Set of selected character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharsetFlags(u8);

impl CharsetFlags {
    /// No classes selected
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every class selected
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Add a class to the set
    pub fn with(self, class: CharClass) -> Self {
        Self(self.0 | class.bit())
    }

    /// Remove a class from the set
    pub fn without(self, class: CharClass) -> Self {
        Self(self.0 & !class.bit())
    }

    pub fn contains(&self, class: CharClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Selected classes, in [`CharClass::ORDER`]
    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ORDER.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<CharClass> for CharsetFlags {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |flags, c| flags.with(c))
    }
}

/// What to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordSpec {
    pub length: usize,
    pub charsets: CharsetFlags,
}

impl PasswordSpec {
    pub fn new(length: usize, charsets: CharsetFlags) -> Self {
        Self { length, charsets }
    }
}

/// A string that zeros its contents on drop
///
/// Debug and Display never print the contents.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Borrow the secret contents
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Deref for SecretString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretString")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

/// Strength label derived from entropy bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    pub fn from_entropy(bits: f64) -> Self {
        if bits < 28.0 {
            Self::VeryWeak
        } else if bits < 36.0 {
            Self::Weak
        } else if bits < 60.0 {
            Self::Reasonable
        } else if bits < 128.0 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryWeak => write!(f, "Very weak"),
            Self::Weak => write!(f, "Weak"),
            Self::Reasonable => write!(f, "Reasonable"),
            Self::Strong => write!(f, "Strong"),
            Self::VeryStrong => write!(f, "Very strong"),
        }
    }
}

/// A freshly generated password with its entropy estimate
#[derive(Debug, Clone)]
pub struct GeneratedPassword {
    pub password: SecretString,
    pub charset_size: usize,
    pub entropy_bits: f64,
}

impl GeneratedPassword {
    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::from_entropy(self.entropy_bits)
    }
}

use crate::config::CharClasses;
use tracing::debug;

pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_+~`|}{[]:;?><,./-=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharClass {
    /// Canonical concatenation order.
    pub const ORDER: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Digits,
        CharClass::Symbols,
    ];

    pub fn chars(self) -> &'static [u8] {
        match self {
            CharClass::Uppercase => UPPERCASE,
            CharClass::Lowercase => LOWERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Symbols => SYMBOLS,
        }
    }

    pub fn is_enabled(self, classes: &CharClasses) -> bool {
        match self {
            CharClass::Uppercase => classes.uppercase,
            CharClass::Lowercase => classes.lowercase,
            CharClass::Digits => classes.digits,
            CharClass::Symbols => classes.symbols,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Uppercase => "Uppercase A-Z",
            CharClass::Lowercase => "Lowercase a-z",
            CharClass::Digits => "Numbers 0-9",
            CharClass::Symbols => "Symbols",
        }
    }
}

/// Characters available for sampling, in canonical class order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).map(|&b| b as char)
    }

    pub fn contains(&self, ch: char) -> bool {
        ch.is_ascii() && self.chars.contains(&(ch as u8))
    }
}

pub fn build_alphabet(classes: CharClasses) -> Alphabet {
    let mut chars = Vec::with_capacity(alphabet_size(classes));

    for class in CharClass::ORDER {
        if class.is_enabled(&classes) {
            chars.extend_from_slice(class.chars());
        }
    }

    debug!(size = chars.len(), "alphabet built");

    Alphabet { chars }
}

/// Size of the alphabet `build_alphabet` would return, without building it.
pub fn alphabet_size(classes: CharClasses) -> usize {
    CharClass::ORDER
        .iter()
        .filter(|class| class.is_enabled(&classes))
        .map(|class| class.chars().len())
        .sum()
}

use crate::error::{Error, Result};

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 32;
pub const DEFAULT_LENGTH: usize = 16;

/// The four independently selectable character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl CharClasses {
    pub const NONE: Self = Self {
        uppercase: false,
        lowercase: false,
        digits: false,
        symbols: false,
    };

    pub const ALL: Self = Self {
        uppercase: true,
        lowercase: true,
        digits: true,
        symbols: true,
    };

    pub fn enabled_count(&self) -> usize {
        [self.uppercase, self.lowercase, self.digits, self.symbols]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0
    }
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: false,
        }
    }
}

/// Snapshot of what the caller wants generated. Owned by the presentation
/// layer and passed by value into the core; the core never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub length: usize,
    pub classes: CharClasses,
}

impl Configuration {
    pub fn new(length: usize, classes: CharClasses) -> Self {
        Self { length, classes }
    }

    /// Checks the length contract without altering the value.
    pub fn validate(&self) -> Result<()> {
        validate_length(self.length)
    }

    pub fn with_length(self, length: usize) -> Self {
        Self { length, ..self }
    }

    pub fn with_classes(self, classes: CharClasses) -> Self {
        Self { classes, ..self }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            classes: CharClasses::default(),
        }
    }
}

pub fn validate_length(length: usize) -> Result<()> {
    if (MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            length,
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        })
    }
}

/// Slider semantics: saturate at the bounds instead of failing.
pub fn clamp_length(length: usize) -> usize {
    length.clamp(MIN_LENGTH, MAX_LENGTH)
}

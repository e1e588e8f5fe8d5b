use crate::config::{Configuration, MIN_LENGTH};
use std::fmt;
use tracing::debug;

pub const MAX_SCORE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthLabel::Weak,
            2 => StrengthLabel::Fair,
            3 => StrengthLabel::Strong,
            _ => StrengthLabel::VeryStrong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicator colour for the strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorTag {
    Red,
    Orange,
    Yellow,
    Green,
}

impl ColorTag {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => ColorTag::Red,
            2 => ColorTag::Orange,
            3 => ColorTag::Yellow,
            _ => ColorTag::Green,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Red => "red",
            ColorTag::Orange => "orange",
            ColorTag::Yellow => "yellow",
            ColorTag::Green => "green",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrengthResult {
    pub score: u8,
    pub label: StrengthLabel,
    pub color: ColorTag,
}

impl StrengthResult {
    pub fn from_score(score: u8) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            score,
            label: StrengthLabel::from_score(score),
            color: ColorTag::from_score(score),
        }
    }

    /// Filled share of the meter, in percent.
    pub fn proportion(&self) -> u8 {
        self.score * 20
    }
}

/// Scores the configuration, not any generated password.
///
/// One point for a length of at least [`MIN_LENGTH`] and one per enabled
/// class. Total for every input, including out-of-range lengths.
pub fn evaluate(config: &Configuration) -> StrengthResult {
    let mut score = 0u8;

    if config.length >= MIN_LENGTH {
        score += 1;
    }
    if config.classes.uppercase {
        score += 1;
    }
    if config.classes.lowercase {
        score += 1;
    }
    if config.classes.digits {
        score += 1;
    }
    if config.classes.symbols {
        score += 1;
    }

    let result = StrengthResult::from_score(score);
    debug!(score = result.score, label = %result.label, "strength evaluated");
    result
}

/// Bits of entropy for `length` independent uniform draws from an alphabet
/// of `alphabet_len` characters. Informational only.
pub fn entropy_bits(alphabet_len: usize, length: usize) -> f64 {
    if alphabet_len == 0 {
        return 0.0;
    }
    length as f64 * (alphabet_len as f64).log2()
}

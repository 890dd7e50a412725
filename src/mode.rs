//! Codec modes and their zero-width alphabets.
//!
//! A mode fixes two things: the ordered alphabet of invisible characters
//! (digit `i` is written as `alphabet[i]`) and the number of digits used for
//! every code point. Both are protocol constants; payloads encoded by other
//! implementations only decode if these tables stay exactly as they are.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ZERO WIDTH SPACE
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';
/// ZERO WIDTH NON-JOINER
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
/// ZERO WIDTH JOINER
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';
/// LEFT-TO-RIGHT MARK
pub const LEFT_TO_RIGHT_MARK: char = '\u{200E}';
/// RIGHT-TO-LEFT MARK
pub const RIGHT_TO_LEFT_MARK: char = '\u{200F}';

const ZWSP_ALPHABET: [char; 3] = [ZERO_WIDTH_SPACE, ZERO_WIDTH_NON_JOINER, ZERO_WIDTH_JOINER];

const FULL_ALPHABET: [char; 5] = [
    ZERO_WIDTH_SPACE,
    ZERO_WIDTH_NON_JOINER,
    ZERO_WIDTH_JOINER,
    LEFT_TO_RIGHT_MARK,
    RIGHT_TO_LEFT_MARK,
];

/// Digits per code point in [`Mode::Zwsp`].
pub const ZWSP_WIDTH: usize = 11;

/// Digits per code point in [`Mode::Full`].
pub const FULL_WIDTH: usize = 7;

/// Largest digit width of any mode. Sizes the encoder's scratch buffer.
pub const MAX_WIDTH: usize = ZWSP_WIDTH;

/// Selects the alphabet and digit width used by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Three symbols (ZWSP, ZWNJ, ZWJ), 11 digits per code point.
    Zwsp,
    /// Five symbols (ZWSP, ZWNJ, ZWJ, LRM, RLM), 7 digits per code point.
    #[default]
    Full,
}

impl Mode {
    /// Ordered alphabet; a character's position is its digit value.
    pub const fn alphabet(self) -> &'static [char] {
        match self {
            Mode::Zwsp => &ZWSP_ALPHABET,
            Mode::Full => &FULL_ALPHABET,
        }
    }

    /// Number of digits written for every code point ("padding").
    pub const fn width(self) -> usize {
        match self {
            Mode::Zwsp => ZWSP_WIDTH,
            Mode::Full => FULL_WIDTH,
        }
    }

    /// Numeral base, i.e. the alphabet size.
    pub const fn base(self) -> u32 {
        self.alphabet().len() as u32
    }

    /// Exclusive upper bound of the code points this mode can represent
    /// (`base ^ width`).
    pub const fn capacity(self) -> u32 {
        self.base().pow(self.width() as u32)
    }

    /// Digit value of `ch`, or `None` if `ch` is carrier text in this mode.
    pub fn digit_of(self, ch: char) -> Option<u8> {
        self.alphabet()
            .iter()
            .position(|&symbol| symbol == ch)
            .map(|index| index as u8)
    }

    /// Whether `ch` belongs to this mode's alphabet.
    pub fn contains(self, ch: char) -> bool {
        self.digit_of(ch).is_some()
    }

    /// Lowercase name used on the command line and in config files.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Zwsp => "zwsp",
            Mode::Full => "full",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown mode '{0}' (expected 'zwsp' or 'full')")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zwsp" => Ok(Mode::Zwsp),
            "full" => Ok(Mode::Full),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_sizes_and_widths() {
        assert_eq!(Mode::Zwsp.base(), 3);
        assert_eq!(Mode::Zwsp.width(), 11);
        assert_eq!(Mode::Full.base(), 5);
        assert_eq!(Mode::Full.width(), 7);
    }

    #[test]
    fn test_capacity() {
        assert_eq!(Mode::Zwsp.capacity(), 177_147);
        assert_eq!(Mode::Full.capacity(), 78_125);
    }

    #[test]
    fn test_full_extends_zwsp() {
        let zwsp = Mode::Zwsp.alphabet();
        let full = Mode::Full.alphabet();

        assert_eq!(&full[..3], zwsp);
        assert_eq!(full[3], LEFT_TO_RIGHT_MARK);
        assert_eq!(full[4], RIGHT_TO_LEFT_MARK);
    }

    #[test]
    fn test_alphabets_are_distinct_and_not_ascii() {
        for mode in [Mode::Zwsp, Mode::Full] {
            let alphabet = mode.alphabet();
            for (i, a) in alphabet.iter().enumerate() {
                assert!(!a.is_ascii());
                for b in &alphabet[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_digit_lookup() {
        assert_eq!(Mode::Zwsp.digit_of(ZERO_WIDTH_SPACE), Some(0));
        assert_eq!(Mode::Zwsp.digit_of(ZERO_WIDTH_JOINER), Some(2));
        assert_eq!(Mode::Zwsp.digit_of(LEFT_TO_RIGHT_MARK), None);
        assert_eq!(Mode::Full.digit_of(RIGHT_TO_LEFT_MARK), Some(4));
        assert_eq!(Mode::Full.digit_of('a'), None);
        assert!(!Mode::Full.contains(' '));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("zwsp".parse::<Mode>().unwrap(), Mode::Zwsp);
        assert_eq!(" FULL ".parse::<Mode>().unwrap(), Mode::Full);
        assert!("base64".parse::<Mode>().is_err());
        assert_eq!(Mode::Zwsp.to_string(), "zwsp");
        assert_eq!(Mode::default(), Mode::Full);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Zwsp).unwrap(), "\"zwsp\"");
        let mode: Mode = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(mode, Mode::Full);
    }
}

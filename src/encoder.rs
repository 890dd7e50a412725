//! Hiding text as zero-width characters.
//!
//! Every code point of the message becomes exactly `mode.width()` invisible
//! characters: its value written in base `mode.base()`, left-padded with the
//! zero digit, each digit mapped through the mode's alphabet.

use thiserror::Error;

use crate::mode::{Mode, MAX_WIDTH};
use crate::radix;

/// Errors that can occur during encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncoderError {
    /// Input bytes were not a UTF-8 string.
    #[error("Cannot encode non-text input: {0}")]
    NotText(#[from] std::str::Utf8Error),

    /// Code point needs more digits than the mode provides.
    #[error("Character {ch:?} (U+{code:04X}) cannot be represented in {mode} mode", code = code_point(.ch))]
    Unrepresentable { ch: char, mode: Mode },
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

/// Encodes `message` into a string made only of `mode`'s alphabet.
///
/// The output holds `message.chars().count() * mode.width()` characters.
/// An empty message yields an empty string.
///
/// # Errors
/// [`EncoderError::Unrepresentable`] if a character's code point is at or
/// above [`Mode::capacity`]. Nothing is returned for the rest of the message.
///
/// # Example
/// ```
/// use zwsp::{decode, encode, Mode};
///
/// let hidden = encode("hi", Mode::Zwsp).unwrap();
/// assert_eq!(hidden.chars().count(), 22);
///
/// let decoded = decode(&format!("hello{hidden}"), Mode::Zwsp).unwrap();
/// assert_eq!(decoded.hidden, "hi");
/// assert_eq!(decoded.carrier, "hello");
/// ```
pub fn encode(message: &str, mode: Mode) -> Result<String, EncoderError> {
    if message.is_empty() {
        return Ok(String::new());
    }

    let alphabet = mode.alphabet();
    let width = mode.width();
    let mut digits = [0u8; MAX_WIDTH];
    let digits = &mut digits[..width];

    // Every alphabet character is 3 bytes in UTF-8.
    let mut encoded = String::with_capacity(message.len() * width * 3);

    for ch in message.chars() {
        // Mode tables always give a valid base, so overflow is the only failure.
        radix::to_digits(u32::from(ch), mode.base(), digits)
            .map_err(|_| EncoderError::Unrepresentable { ch, mode })?;

        encoded.extend(digits.iter().map(|&digit| alphabet[usize::from(digit)]));
    }

    Ok(encoded)
}

/// Encodes untyped input, failing with [`EncoderError::NotText`] unless the
/// bytes are valid UTF-8.
pub fn encode_bytes(message: &[u8], mode: Mode) -> Result<String, EncoderError> {
    let message = std::str::from_utf8(message)?;
    encode(message, mode)
}

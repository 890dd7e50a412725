//! Recovering hidden text from a mixed string.
//!
//! Decoding is one forward scan. Characters from the mode's alphabet feed the
//! digit stream, everything else is carrier text and is kept verbatim. Only
//! alphabet membership decides which stream a character lands in, so the
//! invisible run may sit before, after, or inside the carrier.
//!
//! The single structural check is that the digit stream holds a whole number
//! of `mode.width()`-sized groups. A run of the right length always decodes
//! to *some* sequence of values; corruption inside such a run is not
//! detectable here.

use thiserror::Error;

use crate::mode::Mode;
use crate::radix::{self, RadixError};

/// Errors that can occur during decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecoderError {
    /// Input bytes were not a UTF-8 string.
    #[error("Cannot decode non-text input: {0}")]
    NotText(#[from] std::str::Utf8Error),

    /// The invisible run is not a whole number of code points.
    #[error("Unknown encoding detected: {digits} zero-width characters is not a multiple of {width}")]
    UnknownEncoding { digits: usize, width: usize },

    /// A digit group could not be read back as a number.
    #[error(transparent)]
    Radix(#[from] RadixError),

    /// A group decoded to a value that is not a Unicode scalar value.
    #[error("Decoded value {0:#X} is not a valid character")]
    InvalidCodePoint(u32),
}

/// Result of decoding a mixed string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The hidden payload, exactly as it was passed to `encode`.
    pub hidden: String,
    /// Every non-alphabet character of the input, in original order.
    pub carrier: String,
}

impl Decoded {
    /// Carrier text followed by the hidden text.
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.carrier.len() + self.hidden.len());
        combined.push_str(&self.carrier);
        combined.push_str(&self.hidden);
        combined
    }

    /// Splits into `(hidden, carrier)`.
    pub fn into_parts(self) -> (String, String) {
        (self.hidden, self.carrier)
    }

    /// Whether the input carried any hidden characters.
    pub fn has_hidden(&self) -> bool {
        !self.hidden.is_empty()
    }
}

/// Splits `text` into its hidden payload and its carrier text.
///
/// # Errors
/// - [`DecoderError::UnknownEncoding`] if the invisible characters do not form
///   whole `mode.width()` groups (truncated or foreign run).
/// - [`DecoderError::InvalidCodePoint`] if a group decodes to a surrogate.
pub fn decode(text: &str, mode: Mode) -> Result<Decoded, DecoderError> {
    let width = mode.width();
    let base = mode.base();

    let mut digits: Vec<u8> = Vec::new();
    let mut carrier = String::with_capacity(text.len());

    for ch in text.chars() {
        match mode.digit_of(ch) {
            Some(digit) => digits.push(digit),
            None => carrier.push(ch),
        }
    }

    if digits.len() % width != 0 {
        return Err(DecoderError::UnknownEncoding {
            digits: digits.len(),
            width,
        });
    }

    let mut hidden = String::with_capacity(digits.len() / width);
    for group in digits.chunks_exact(width) {
        let value = radix::from_digits(group, base)?;
        let ch = char::from_u32(value).ok_or(DecoderError::InvalidCodePoint(value))?;
        hidden.push(ch);
    }

    Ok(Decoded { hidden, carrier })
}

/// Decodes untyped input, failing with [`DecoderError::NotText`] unless the
/// bytes are valid UTF-8.
pub fn decode_bytes(text: &[u8], mode: Mode) -> Result<Decoded, DecoderError> {
    let text = std::str::from_utf8(text)?;
    decode(text, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::mode::{LEFT_TO_RIGHT_MARK, ZERO_WIDTH_SPACE};

    #[test]
    fn test_roundtrip_both_modes() {
        for mode in [Mode::Zwsp, Mode::Full] {
            let encoded = encode("Hidden message, 23°C", mode).unwrap();
            let decoded = decode(&encoded, mode).unwrap();
            assert_eq!(decoded.hidden, "Hidden message, 23°C");
            assert_eq!(decoded.carrier, "");
        }
    }

    #[test]
    fn test_decode_a() {
        let encoded = encode("A", Mode::Zwsp).unwrap();
        assert_eq!(
            decode(&encoded, Mode::Zwsp).unwrap().into_parts(),
            ("A".to_string(), String::new())
        );
    }

    #[test]
    fn test_carrier_only() {
        let decoded = decode("just a normal sentence", Mode::Zwsp).unwrap();
        assert_eq!(decoded.hidden, "");
        assert_eq!(decoded.carrier, "just a normal sentence");
        assert!(!decoded.has_hidden());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode("", Mode::Full).unwrap(), Decoded::default());
    }

    #[test]
    fn test_carrier_prefix_and_suffix() {
        let encoded = encode("27", Mode::Zwsp).unwrap();

        let suffix = decode(&format!("Temperature today{encoded}"), Mode::Zwsp).unwrap();
        assert_eq!(suffix.hidden, "27");
        assert_eq!(suffix.carrier, "Temperature today");

        let prefix = decode(&format!("{encoded}Temperature today"), Mode::Zwsp).unwrap();
        assert_eq!(prefix, suffix);
    }

    #[test]
    fn test_interleaved_carrier() {
        let encoded: Vec<char> = encode("ok", Mode::Full).unwrap().chars().collect();
        let carrier: Vec<char> = "abcdefghijklmn".chars().collect();

        let mut mixed = String::new();
        for (e, c) in encoded.iter().zip(carrier.iter()) {
            mixed.push(*c);
            mixed.push(*e);
        }

        let decoded = decode(&mixed, Mode::Full).unwrap();
        assert_eq!(decoded.hidden, "ok");
        assert_eq!(decoded.carrier, "abcdefghijklmn");
    }

    #[test]
    fn test_truncated_run_is_rejected() {
        let mut encoded = encode("secret", Mode::Zwsp).unwrap();
        encoded.pop();

        assert_eq!(
            decode(&encoded, Mode::Zwsp).unwrap_err(),
            DecoderError::UnknownEncoding {
                digits: 6 * 11 - 1,
                width: 11
            }
        );
    }

    #[test]
    fn test_stray_zero_width_char_in_carrier() {
        let text = format!("looks{}innocent", ZERO_WIDTH_SPACE);
        assert!(matches!(
            decode(&text, Mode::Zwsp),
            Err(DecoderError::UnknownEncoding { digits: 1, .. })
        ));
    }

    #[test]
    fn test_mark_is_carrier_in_zwsp_mode() {
        let text = format!("rtl{}text", LEFT_TO_RIGHT_MARK);
        let decoded = decode(&text, Mode::Zwsp).unwrap();
        assert_eq!(decoded.carrier, text);
    }

    #[test]
    fn test_surrogate_value_rejected() {
        // 0xD800 = 55296 written as 11 base-3 digits
        let mut digits = [0u8; 11];
        radix::to_digits(0xD800, 3, &mut digits).unwrap();
        let text: String = digits
            .iter()
            .map(|&d| Mode::Zwsp.alphabet()[usize::from(d)])
            .collect();

        assert_eq!(
            decode(&text, Mode::Zwsp).unwrap_err(),
            DecoderError::InvalidCodePoint(0xD800)
        );
    }

    #[test]
    fn test_decode_bytes() {
        assert!(matches!(
            decode_bytes(&[0xc3, 0x28], Mode::Zwsp),
            Err(DecoderError::NotText(_))
        ));

        let encoded = encode("x", Mode::Zwsp).unwrap();
        let payload = format!("carrier{encoded}");
        let decoded = decode_bytes(payload.as_bytes(), Mode::Zwsp).unwrap();
        assert_eq!(decoded.hidden, "x");
    }

    #[test]
    fn test_combined() {
        let decoded = Decoded {
            hidden: "23".to_string(),
            carrier: "Hello ".to_string(),
        };
        assert_eq!(decoded.combined(), "Hello 23");
    }
}

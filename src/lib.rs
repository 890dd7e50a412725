//! # zwsp - hide text inside text
//!
//! `zwsp` hides a string inside ordinary text using characters that render
//! with no width at all.
//!
//! ## Overview
//!
//! - Every code point of the secret is written as a fixed number of digits
//!   in base 3 or base 5
//! - Each digit becomes one zero-width character (the mode's alphabet)
//! - The invisible run is spliced anywhere into a visible carrier message
//! - Decoding separates the two streams again: invisible characters are the
//!   secret, everything else is the carrier, untouched
//!
//! There is no encryption. The secret is invisible, not confidential.
//!
//! ## Modes
//!
//! | Mode | Alphabet | Digits per character |
//! |------|----------|----------------------|
//! | [`Mode::Zwsp`] | ZWSP, ZWNJ, ZWJ | 11 |
//! | [`Mode::Full`] | ZWSP, ZWNJ, ZWJ, LRM, RLM | 7 |
//!
//! Both ends must use the same mode.
//!
//! ## Example
//!
//! ```rust
//! use zwsp::{decode, encode, Mode};
//!
//! let hidden = encode("23", Mode::Zwsp).unwrap();
//! let message = format!("Lovely weather today{hidden}");
//!
//! // Looks like "Lovely weather today" everywhere it is displayed.
//! let decoded = decode(&message, Mode::Zwsp).unwrap();
//! assert_eq!(decoded.hidden, "23");
//! assert_eq!(decoded.carrier, "Lovely weather today");
//! ```
//!
//! ## Known limitation
//!
//! Stream assignment is by alphabet membership only. A zero-width character
//! that was already part of the carrier is read as hidden data, which
//! usually surfaces as [`DecoderError::UnknownEncoding`].
//!
//! ## Modules
//!
//! - [`mode`]: alphabets and digit widths
//! - [`radix`]: fixed-width base conversion
//! - [`encoder`]: text to zero-width characters
//! - [`decoder`]: mixed text to hidden + carrier
//! - [`relay`]: sender, receiver and observer fan-out around the codec

pub mod decoder;
pub mod encoder;
pub mod mode;
pub mod radix;
pub mod relay;

// Re-export commonly used types at the crate root
pub use decoder::{decode, decode_bytes, Decoded, DecoderError};
pub use encoder::{encode, encode_bytes, EncoderError};
pub use mode::{Mode, ParseModeError};

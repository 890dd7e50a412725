//! Fixed-width numeral base conversion.
//!
//! Digits are written most significant first. A value always occupies the
//! full width: short values are left-padded with digit 0, values that need
//! more digits are rejected instead of being truncated.

use thiserror::Error;

/// Errors from digit conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RadixError {
    #[error("Base {0} is not supported (must be at least 2)")]
    InvalidBase(u32),

    #[error("Value {value} does not fit in {width} base-{base} digits")]
    Overflow { value: u32, base: u32, width: usize },

    #[error("Digit {digit} is out of range for base {base}")]
    InvalidDigit { digit: u8, base: u32 },
}

/// Writes `value` as exactly `out.len()` base-`base` digits into `out`.
///
/// The buffer is filled from the least significant end; whatever remains of
/// `value` once the buffer is full means it did not fit.
pub fn to_digits(value: u32, base: u32, out: &mut [u8]) -> Result<(), RadixError> {
    if base < 2 {
        return Err(RadixError::InvalidBase(base));
    }

    let mut rest = value;
    for slot in out.iter_mut().rev() {
        *slot = (rest % base) as u8;
        rest /= base;
    }

    if rest != 0 {
        return Err(RadixError::Overflow {
            value,
            base,
            width: out.len(),
        });
    }

    Ok(())
}

/// Reads base-`base` digits (most significant first) back into an integer.
pub fn from_digits(digits: &[u8], base: u32) -> Result<u32, RadixError> {
    if base < 2 {
        return Err(RadixError::InvalidBase(base));
    }

    digits.iter().try_fold(0u32, |acc, &digit| {
        if u32::from(digit) >= base {
            return Err(RadixError::InvalidDigit { digit, base });
        }
        acc.checked_mul(base)
            .and_then(|shifted| shifted.checked_add(u32::from(digit)))
            .ok_or(RadixError::Overflow {
                value: acc,
                base,
                width: digits.len(),
            })
    })
}

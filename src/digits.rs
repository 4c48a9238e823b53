//! The canonical DDMMYYYY digit encoding of a calendar date.

use std::fmt;
use std::str::FromStr;

use crate::{DIGIT_COUNT, LAST_TWO_DIGITS_MODULUS, ParseError, YEAR_DIGITS_MODULUS};

/// Eight decimal digits in day-day-month-month-year-year-year-year order.
///
/// Every element is in `0..=9`. The encoding is locale independent and carries
/// no separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateDigits([u8; DIGIT_COUNT]);

impl DateDigits {
    /// Encodes a (year, month, day) triple as DDMMYYYY.
    ///
    /// Total over every input: day and month keep their last two decimal digits,
    /// the year is reduced modulo 10000 (Euclidean, so negative years wrap too).
    /// No calendar validation happens here.
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        let day = day % 100;
        let month = month % 100;
        // rem_euclid keeps this in 0..10000, so the cast is lossless
        #[allow(clippy::cast_sign_loss)]
        let year = year.rem_euclid(YEAR_DIGITS_MODULUS) as u32;

        Self([
            day / 10,
            day % 10,
            month / 10,
            month % 10,
            (year / 1000) as u8,
            (year / 100 % 10) as u8,
            (year / 10 % 10) as u8,
            (year % 10) as u8,
        ])
    }

    /// Wraps raw digits, rejecting any element above 9.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if a digit is out of range.
    pub fn from_array(digits: [u8; DIGIT_COUNT]) -> Result<Self, ParseError> {
        if digits.iter().any(|&d| d > 9) {
            return Err(ParseError::InvalidFormat(format!("{digits:?}")));
        }
        Ok(Self(digits))
    }

    pub const fn as_array(&self) -> [u8; DIGIT_COUNT] {
        self.0
    }

    /// Reads the same backward as forward.
    pub fn is_palindrome(&self) -> bool {
        self.0.iter().eq(self.0.iter().rev())
    }

    /// Every digit equals the first one.
    pub fn all_identical(&self) -> bool {
        self.0.iter().all(|&d| d == self.0[0])
    }

    /// The four two-digit chunks are all equal to the first chunk, e.g. `12121212`.
    pub fn has_repeating_pairs(&self) -> bool {
        self.0.chunks_exact(2).all(|pair| pair == &self.0[..2])
    }

    /// Each digit is exactly one more than its predecessor (`01234567`).
    pub fn is_ascending(&self) -> bool {
        self.0.windows(2).all(|w| w[1] == w[0] + 1)
    }

    /// Each digit is exactly one less than its predecessor (`76543210`).
    pub fn is_descending(&self) -> bool {
        self.0.windows(2).all(|w| w[1] + 1 == w[0])
    }
}

/// Last two decimal digits of a year, wrapping for any year.
pub const fn last_two_digits(year: i32) -> i32 {
    year.rem_euclid(LAST_TWO_DIGITS_MODULUS)
}

impl fmt::Display for DateDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for DateDigits {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if trimmed.len() != DIGIT_COUNT || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(format!(
                "expected {DIGIT_COUNT} ASCII digits, got {trimmed:?}"
            )));
        }

        let mut digits = [0u8; DIGIT_COUNT];
        for (slot, byte) in digits.iter_mut().zip(trimmed.bytes()) {
            *slot = byte - b'0';
        }
        Ok(Self(digits))
    }
}

//! Phone numbers for customer fixtures.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The number does not start with the mobile prefix.
    #[error("phone number must start with {}", PhoneNumber::PREFIX)]
    MissingPrefix,
    /// The number has the wrong number of subscriber digits.
    #[error("phone number must have exactly {} digits after the prefix", PhoneNumber::SUBSCRIBER_DIGITS)]
    WrongLength,
    /// The number contains a non-digit character.
    #[error("phone number must contain only digits")]
    NonDigit,
}

/// A mobile phone number in the format the admin API validates:
/// the `010` prefix followed by exactly 8 digits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Mobile prefix every fixture number starts with.
    pub const PREFIX: &'static str = "010";
    /// Number of digits following the prefix.
    pub const SUBSCRIBER_DIGITS: usize = 8;

    /// Parse a phone number, enforcing the `010` + 8 digits format.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix, length, or digit constraint fails.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let rest = s.strip_prefix(Self::PREFIX).ok_or(PhoneError::MissingPrefix)?;
        if !rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }
        if rest.len() != Self::SUBSCRIBER_DIGITS {
            return Err(PhoneError::WrongLength);
        }
        Ok(Self(s.to_owned()))
    }

    /// Generate a random number with 8 uniformly drawn subscriber digits.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut number = String::with_capacity(Self::PREFIX.len() + Self::SUBSCRIBER_DIGITS);
        number.push_str(Self::PREFIX);
        for _ in 0..Self::SUBSCRIBER_DIGITS {
            let digit: u8 = rng.random_range(0..10);
            number.push(char::from(b'0' + digit));
        }
        Self(number)
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

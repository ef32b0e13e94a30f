//! Postal/ZIP code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostalCodeError {
    /// The input string is empty.
    #[error("postal code cannot be empty")]
    Empty,
    /// The input is shorter than the minimum length.
    #[error("postal code must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input is longer than the maximum length.
    #[error("postal code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that is not a letter or digit.
    #[error("postal code may only contain letters and digits")]
    InvalidCharacter,
}

/// A postal or ZIP code.
///
/// Validation is deliberately international-friendly rather than
/// country-specific: 3 to 10 ASCII letters or digits.
///
/// ## Examples
///
/// ```
/// use encore_core::PostalCode;
///
/// assert!(PostalCode::parse("90210").is_ok());
/// assert!(PostalCode::parse("SW1A1AA").is_ok());
/// assert!(PostalCode::parse("12").is_err());       // too short
/// assert!(PostalCode::parse("123 45").is_err());   // space
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Minimum length of a postal code.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum length of a postal code.
    pub const MAX_LENGTH: usize = 10;

    /// Parse a `PostalCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, outside the 3-10 character
    /// range, or contains anything other than ASCII letters and digits.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        if s.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        if s.len() < Self::MIN_LENGTH {
            return Err(PostalCodeError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(PostalCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PostalCodeError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the postal code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PostalCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

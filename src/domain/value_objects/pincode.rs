//! # Pincode Value Object
//!
//! A destination postal code that has passed format validation.
//!
//! Validation happens once at the service boundary, before any zone is
//! consulted. The matcher itself accepts arbitrary strings.
//!
//! # Examples
//!
//! ```
//! use shipping_resolver::domain::value_objects::Pincode;
//!
//! let code = Pincode::parse(" 400010 ").unwrap();
//! assert_eq!(code.as_str(), "400010");
//! assert_eq!(code.numeric(), Some(400010));
//!
//! assert!(Pincode::parse("").is_err());
//! assert!(Pincode::parse("40*001").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default upper bound on postal code length.
pub const DEFAULT_MAX_PINCODE_LENGTH: usize = 10;

/// A validated postal code.
///
/// # Invariants
///
/// - Non-empty after trimming surrounding whitespace
/// - At most the configured number of characters
/// - ASCII letters and digits, with single inner spaces or hyphens
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    /// Parses a postal code using [`DEFAULT_MAX_PINCODE_LENGTH`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPincodeFormat` if the input is empty,
    /// too long, or contains characters outside the accepted set.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        Self::parse_with_max_length(raw, DEFAULT_MAX_PINCODE_LENGTH)
    }

    /// Parses a postal code with an explicit length limit.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPincodeFormat` on any format violation.
    pub fn parse_with_max_length(raw: &str, max_length: usize) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_pincode("pincode is empty"));
        }
        if trimmed.chars().count() > max_length {
            return Err(DomainError::invalid_pincode(format!(
                "pincode exceeds {max_length} characters"
            )));
        }

        let bounded_by_alphanumerics = trimmed
            .chars()
            .next()
            .zip(trimmed.chars().next_back())
            .is_some_and(|(first, last)| {
                first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric()
            });
        if !bounded_by_alphanumerics {
            return Err(DomainError::invalid_pincode(format!(
                "separator at edge of {trimmed:?}"
            )));
        }

        let mut previous_separator = false;
        for ch in trimmed.chars() {
            if ch.is_ascii_alphanumeric() {
                previous_separator = false;
            } else if ch == ' ' || ch == '-' {
                if previous_separator {
                    return Err(DomainError::invalid_pincode(format!(
                        "repeated separator in {trimmed:?}"
                    )));
                }
                previous_separator = true;
            } else {
                return Err(DomainError::invalid_pincode(format!(
                    "unexpected character {ch:?} in {trimmed:?}"
                )));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the postal code as entered (trimmed).
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value when the code consists only of digits.
    #[must_use]
    pub fn numeric(&self) -> Option<u64> {
        parse_numeric(&self.0)
    }
}

/// Parses an all-digit string into a number.
///
/// Signs, whitespace and separators are rejected so that `"+4"` or
/// `"4 00"` never compare numerically.
pub(crate) fn parse_numeric(code: &str) -> Option<u64> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Pincode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pincode> for String {
    fn from(value: Pincode) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let code = Pincode::parse("  560001\t").unwrap();
        assert_eq!(code.as_str(), "560001");
    }

    #[test]
    fn accepts_alphanumeric_with_separators() {
        assert!(Pincode::parse("SW1A 1AA").is_ok());
        assert!(Pincode::parse("12345-6789").is_ok());
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(Pincode::parse("").is_err());
        assert!(Pincode::parse("   ").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let err = Pincode::parse("12345678901").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPincodeFormat(_)));
        assert!(Pincode::parse_with_max_length("12345678901", 12).is_ok());
    }

    #[test]
    fn rejects_symbols_and_double_separators() {
        assert!(Pincode::parse("4000$1").is_err());
        assert!(Pincode::parse("400--01").is_err());
        assert!(Pincode::parse("^400\\d").is_err());
    }

    #[test]
    fn rejects_leading_trailing_and_lone_separators() {
        for raw in ["-", " - ", "400010-", "-400010", "SW1A 1AA-"] {
            let err = Pincode::parse(raw).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPincodeFormat(_)), "{raw:?}");
        }
        assert!(Pincode::parse("400-010").is_ok());
    }

    #[test]
    fn numeric_only_for_digit_codes() {
        assert_eq!(Pincode::parse("000123").unwrap().numeric(), Some(123));
        assert_eq!(Pincode::parse("SW1A 1AA").unwrap().numeric(), None);
        assert_eq!(Pincode::parse("400-001").unwrap().numeric(), None);
    }

    #[test]
    fn parse_numeric_rejects_signs() {
        assert_eq!(parse_numeric("+400"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("99999999999999999999999"), None);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Pincode, _> = serde_json::from_str("\"400001\"");
        assert!(ok.is_ok());
        let bad: Result<Pincode, _> = serde_json::from_str("\"!!\"");
        assert!(bad.is_err());
    }
}

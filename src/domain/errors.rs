//! # Domain Errors
//!
//! Error types for domain rule violations.
//!
//! These errors are raised by value-object constructors and pure domain
//! services. They never represent infrastructure failures.

use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The postal code does not have an acceptable shape.
    #[error("invalid pincode format: {0}")]
    InvalidPincodeFormat(String),

    /// A shipment attribute in the resolution context is out of range.
    #[error("invalid resolution context: {0}")]
    InvalidContext(String),

    /// The holiday calendar left no business day within the search horizon.
    #[error("no business day found within {horizon_days} days of {from}")]
    CalendarExhausted {
        /// Date the search started from.
        from: String,
        /// Number of calendar days scanned.
        horizon_days: u32,
    },
}

impl DomainError {
    /// Creates an invalid pincode format error.
    #[must_use]
    pub fn invalid_pincode(message: impl Into<String>) -> Self {
        Self::InvalidPincodeFormat(message.into())
    }

    /// Creates an invalid context error.
    #[must_use]
    pub fn invalid_context(message: impl Into<String>) -> Self {
        Self::InvalidContext(message.into())
    }

    /// Returns true if this error was caused by caller input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidPincodeFormat(_) | Self::InvalidContext(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

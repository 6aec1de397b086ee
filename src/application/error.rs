//! # Application Errors
//!
//! Error types for the shipping resolution use cases.
//!
//! Business outcomes ("we do not ship here", "no such method") are kept
//! apart from system faults so callers can render the former and retry
//! the latter.
//!
//! # Error Hierarchy
//!
//! ```text
//! ShippingError
//! ├── InvalidPincodeFormat      - Postal code rejected before resolution
//! ├── InvalidContext            - Negative weight/order value, bad as-of
//! ├── NoServiceableZone         - No active zone covers the postal code
//! ├── MethodNotFound            - Unknown method id
//! ├── MethodDisabled            - Method exists but is inactive
//! ├── CalendarExhausted         - Holiday calendar leaves no business day
//! └── RepositoryUnavailable     - Collaborator failed or timed out
//! ```
//!
//! # Examples
//!
//! ```
//! use shipping_resolver::application::error::ShippingError;
//! use shipping_resolver::infrastructure::persistence::RepositoryError;
//!
//! let err = ShippingError::no_serviceable_zone("999999");
//! assert!(err.is_not_serviceable());
//!
//! let err: ShippingError = RepositoryError::timeout("ShippingZone", 500).into();
//! assert!(err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::MethodId;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Shipping resolution error.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// The postal code failed syntactic validation.
    #[error("invalid pincode format: {0}")]
    InvalidPincodeFormat(String),

    /// The resolution context is inconsistent.
    #[error("invalid context: {0}")]
    InvalidContext(String),

    /// No active zone covers the postal code.
    #[error("no serviceable zone for pincode {pincode}")]
    NoServiceableZone {
        /// The postal code that was resolved.
        pincode: String,
    },

    /// No method with this id exists.
    #[error("shipping method not found: {0}")]
    MethodNotFound(MethodId),

    /// The method exists but is not active.
    #[error("shipping method disabled: {0}")]
    MethodDisabled(MethodId),

    /// The ETA could not be placed on a business day.
    #[error("delivery date unavailable: {0}")]
    CalendarExhausted(DomainError),

    /// A repository read failed or timed out.
    #[error("repository unavailable: {0}")]
    RepositoryUnavailable(#[from] RepositoryError),
}

impl ShippingError {
    /// Creates an invalid pincode error.
    #[must_use]
    pub fn invalid_pincode(message: impl Into<String>) -> Self {
        Self::InvalidPincodeFormat(message.into())
    }

    /// Creates an invalid context error.
    #[must_use]
    pub fn invalid_context(message: impl Into<String>) -> Self {
        Self::InvalidContext(message.into())
    }

    /// Creates a no serviceable zone error.
    #[must_use]
    pub fn no_serviceable_zone(pincode: impl Into<String>) -> Self {
        Self::NoServiceableZone {
            pincode: pincode.into(),
        }
    }

    /// Creates a method not found error.
    #[must_use]
    pub fn method_not_found(id: impl Into<MethodId>) -> Self {
        Self::MethodNotFound(id.into())
    }

    /// Creates a method disabled error.
    #[must_use]
    pub fn method_disabled(id: impl Into<MethodId>) -> Self {
        Self::MethodDisabled(id.into())
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPincodeFormat(_) | Self::InvalidContext(_))
    }

    /// Returns true if the postal code is not served.
    #[must_use]
    pub fn is_not_serviceable(&self) -> bool {
        matches!(self, Self::NoServiceableZone { .. })
    }

    /// Returns true if the requested method cannot be used, whether it is
    /// missing or disabled.
    #[must_use]
    pub fn is_method_not_found(&self) -> bool {
        matches!(self, Self::MethodNotFound(_) | Self::MethodDisabled(_))
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RepositoryUnavailable(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl From<DomainError> for ShippingError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidPincodeFormat(msg) => Self::InvalidPincodeFormat(msg),
            DomainError::InvalidContext(msg) => Self::InvalidContext(msg),
            err @ DomainError::CalendarExhausted { .. } => Self::CalendarExhausted(err),
        }
    }
}

/// Result type for shipping resolution.
pub type ShippingResult<T> = Result<T, ShippingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pincode_is_validation() {
        let err = ShippingError::invalid_pincode("empty");
        assert!(err.is_validation());
        assert!(err.to_string().contains("invalid pincode"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn no_serviceable_zone_names_pincode() {
        let err = ShippingError::no_serviceable_zone("999999");
        assert!(err.is_not_serviceable());
        assert!(err.to_string().contains("999999"));
    }

    #[test]
    fn missing_and_disabled_methods_are_distinct() {
        let missing = ShippingError::method_not_found("m-x");
        let disabled = ShippingError::method_disabled("m-x");
        assert!(missing.is_method_not_found());
        assert!(disabled.is_method_not_found());
        assert!(matches!(missing, ShippingError::MethodNotFound(_)));
        assert!(matches!(disabled, ShippingError::MethodDisabled(_)));
        assert_ne!(missing.to_string(), disabled.to_string());
    }

    #[test]
    fn repository_timeout_is_retryable() {
        let err: ShippingError = RepositoryError::timeout("ShippingRate", 100).into();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("repository unavailable"));
    }

    #[test]
    fn repository_query_failure_is_not_retryable() {
        let err: ShippingError = RepositoryError::query("bad filter").into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn domain_errors_map_onto_variants() {
        let err: ShippingError = DomainError::invalid_pincode("bad").into();
        assert!(matches!(err, ShippingError::InvalidPincodeFormat(_)));

        let err: ShippingError = DomainError::invalid_context("negative weight").into();
        assert!(matches!(err, ShippingError::InvalidContext(_)));

        let err: ShippingError = DomainError::CalendarExhausted {
            from: "2026-01-01".to_string(),
            horizon_days: 366,
        }
        .into();
        assert!(matches!(err, ShippingError::CalendarExhausted(_)));
    }
}

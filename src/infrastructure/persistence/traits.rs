//! # Repository Traits
//!
//! Port definitions for the shipping catalog.
//!
//! The resolution engine reads zones, methods and rates exclusively
//! through these traits. Implementations can sit on any store; the
//! engine never writes through them.
//!
//! # Available Repositories
//!
//! - [`ZoneRepository`]: active shipping zones
//! - [`MethodRepository`]: shipping methods by id, and all active methods
//! - [`RateRepository`]: active rates of one method within a set of zones
//!
//! # Examples
//!
//! ```ignore
//! use shipping_resolver::infrastructure::persistence::traits::ZoneRepository;
//!
//! async fn count_zones(repo: &impl ZoneRepository) {
//!     let zones = repo.list_active_zones().await.unwrap();
//!     println!("{} active zones", zones.len());
//! }
//! ```

use crate::domain::entities::{ShippingMethod, ShippingRate, ShippingZone};
use crate::domain::value_objects::{MethodId, ZoneId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The read did not complete within the allotted time.
    #[error("Timeout after {timeout_ms}ms reading {entity_type}")]
    Timeout {
        /// Type of entity being read.
        entity_type: &'static str,
        /// Allotted time in milliseconds.
        timeout_ms: u64,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(entity_type: &'static str, timeout_ms: u64) -> Self {
        Self::Timeout {
            entity_type,
            timeout_ms,
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if the caller may reasonably retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read access to shipping zones.
#[async_trait]
pub trait ZoneRepository: Send + Sync + fmt::Debug {
    /// Lists every zone with `is_active == true`.
    async fn list_active_zones(&self) -> RepositoryResult<Vec<ShippingZone>>;
}

/// Read access to shipping methods.
#[async_trait]
pub trait MethodRepository: Send + Sync + fmt::Debug {
    /// Gets a method by ID, active or not.
    ///
    /// Returns `None` if the method does not exist.
    async fn get_method(&self, id: &MethodId) -> RepositoryResult<Option<ShippingMethod>>;

    /// Lists every method with `is_active == true`.
    async fn list_active_methods(&self) -> RepositoryResult<Vec<ShippingMethod>>;
}

/// Read access to shipping rates.
#[async_trait]
pub trait RateRepository: Send + Sync + fmt::Debug {
    /// Lists active rates of `method_id` attached to any of `zone_ids`.
    async fn list_active_rates(
        &self,
        method_id: &MethodId,
        zone_ids: &[ZoneId],
    ) -> RepositoryResult<Vec<ShippingRate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error() {
        let err = RepositoryError::connection("Connection refused");
        assert!(err.to_string().contains("Connection"));
        assert!(err.to_string().contains("refused"));
        assert!(err.is_retryable());
    }

    #[test]
    fn query_error() {
        let err = RepositoryError::query("Invalid SQL");
        assert!(err.to_string().contains("Query"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn timeout_error() {
        let err = RepositoryError::timeout("ShippingZone", 250);
        assert!(err.is_timeout());
        assert!(err.is_retryable());
        assert!(err.to_string().contains("250ms"));
        assert!(err.to_string().contains("ShippingZone"));
    }

    #[test]
    fn serialization_error() {
        let err = RepositoryError::serialization("JSON parse error");
        assert!(err.to_string().contains("Serialization"));
    }

    #[test]
    fn internal_error() {
        let err = RepositoryError::internal("Unexpected state");
        assert!(err.to_string().contains("Internal"));
        assert!(!err.is_timeout());
    }
}

//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ZoneId`], [`MethodId`], [`RateId`]: opaque string identifiers
//!
//! ## Request Types
//!
//! - [`Pincode`]: validated destination postal code
//! - [`ResolutionContext`]: shipment attributes for one request
//! - [`Timestamp`]: UTC instant with offset-aware calendar projections

pub mod ids;
pub mod pincode;
pub mod resolution_context;
pub mod timestamp;

pub use ids::{MethodId, RateId, ZoneId};
pub use pincode::{DEFAULT_MAX_PINCODE_LENGTH, Pincode};
pub use resolution_context::ResolutionContext;
pub use timestamp::Timestamp;

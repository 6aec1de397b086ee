//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`ZoneResolver`]: Postal code to zone resolution
//! - [`RateCatalog`]: Rate selection for a method across zones
//! - [`ShippingResolutionService`]: Available methods and shipping quotes

mod bounded_read;
pub mod rate_catalog;
pub mod shipping_resolution;
pub mod zone_resolver;

pub use rate_catalog::RateCatalog;
pub use shipping_resolution::{
    MethodQuote, MethodSummary, ResolutionConfig, ShippingQuote, ShippingResolutionService,
};
pub use zone_resolver::ZoneResolver;

//! # Domain Entities
//!
//! Persistent shipping catalog records. The engine only ever reads them.
//!
//! - [`ShippingZone`]: postal-code region with inclusion/exclusion rules
//! - [`ShippingMethod`]: service level with default price and transit time
//! - [`ShippingRate`]: priced override of a method within one zone

pub mod method;
pub mod rate;
pub mod zone;

pub use method::ShippingMethod;
pub use rate::{RateConditions, ShippingRate, TimeRange, band_admits};
pub use zone::ShippingZone;

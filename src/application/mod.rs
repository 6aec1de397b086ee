//! # Application Layer
//!
//! Use cases built on the domain model: zone resolution, rate selection
//! and shipping quotes.

pub mod error;
pub mod services;

pub use error::{ShippingError, ShippingResult};

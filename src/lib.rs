//! # Shipping Resolver
//!
//! Shipping zone and rate resolution for checkout.
//!
//! Given a destination postal code and a shipment's weight, order value,
//! cart categories and customer group, the engine answers:
//!
//! - which shipping zones cover the destination,
//! - which shipping methods are available there,
//! - which priced rate governs the shipment, and
//! - when the parcel should arrive.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ application   ShippingResolutionService      │
//! │               ZoneResolver · RateCatalog     │
//! ├──────────────────────────────────────────────┤
//! │ domain        zones · methods · rates        │
//! │               pincode matcher · ranking · ETA│
//! ├──────────────────────────────────────────────┤
//! │ infrastructure repositories · snapshots ·    │
//! │               settings                       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use shipping_resolver::application::services::{ResolutionConfig, ShippingResolutionService};
//! use shipping_resolver::domain::entities::{ShippingMethod, ShippingZone};
//! use shipping_resolver::domain::services::StaticHolidayCalendar;
//! use shipping_resolver::domain::value_objects::{MethodId, ResolutionContext, Timestamp};
//! use shipping_resolver::infrastructure::persistence::in_memory::{
//!     InMemoryMethodRepository, InMemoryRateRepository, InMemoryZoneRepository,
//! };
//!
//! # tokio_test::block_on(async {
//! let service = ShippingResolutionService::new(
//!     Arc::new(InMemoryZoneRepository::with_zones([
//!         ShippingZone::new("z-metro", "Metro", 1).with_range("400001-400099"),
//!     ])),
//!     Arc::new(InMemoryMethodRepository::with_methods([
//!         ShippingMethod::new("m-std", "Standard", "standard", Decimal::new(599, 2), 3),
//!     ])),
//!     Arc::new(InMemoryRateRepository::new()),
//!     Arc::new(StaticHolidayCalendar::new()),
//!     ResolutionConfig::default(),
//! );
//!
//! let ctx = ResolutionContext::new(Timestamp::parse_rfc3339("2026-10-16T10:00:00Z").unwrap());
//! let quote = service
//!     .calculate_shipping(&MethodId::new("m-std"), "400010", &ctx)
//!     .await
//!     .unwrap();
//! assert_eq!(quote.base_rate, Decimal::new(599, 2));
//! assert_eq!(quote.eta.estimated_delivery_date.to_string(), "2026-10-21");
//! # });
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

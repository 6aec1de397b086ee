//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryZoneRepository`]: Shipping zones
//! - [`InMemoryMethodRepository`]: Shipping methods
//! - [`InMemoryRateRepository`]: Shipping rates
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod method_repository;
pub mod rate_repository;
pub mod zone_repository;

pub use method_repository::InMemoryMethodRepository;
pub use rate_repository::InMemoryRateRepository;
pub use zone_repository::InMemoryZoneRepository;

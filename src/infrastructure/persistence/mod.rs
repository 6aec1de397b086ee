//! # Persistence Layer
//!
//! Repository ports and their in-memory implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`ZoneRepository`]: Active shipping zones
//! - [`MethodRepository`]: Shipping methods
//! - [`RateRepository`]: Shipping rates by method and zone
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for tests and the CLI
//! - `snapshot`: JSON catalog documents that seed the in-memory stores

pub mod in_memory;
pub mod snapshot;
pub mod traits;

pub use snapshot::{CatalogSnapshot, InMemoryCatalog};
pub use traits::{
    MethodRepository, RateRepository, RepositoryError, RepositoryResult, ZoneRepository,
};

//! # Infrastructure Layer
//!
//! Adapters around the domain: repository ports and their in-memory
//! implementations, catalog snapshots, and deployment settings.

pub mod persistence;
pub mod settings;

pub use settings::{EngineSettings, SettingsError, SettingsResult};

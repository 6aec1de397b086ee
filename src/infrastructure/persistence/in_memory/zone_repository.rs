//! # In-Memory Zone Repository
//!
//! In-memory implementation of [`ZoneRepository`] for tests and the CLI.
//!
//! This implementation uses a thread-safe `HashMap` for storage,
//! making it suitable for unit tests without database dependencies.

use crate::domain::entities::ShippingZone;
use crate::domain::value_objects::ZoneId;
use crate::infrastructure::persistence::traits::{RepositoryResult, ZoneRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ZoneRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryZoneRepository {
    storage: Arc<RwLock<HashMap<ZoneId, ShippingZone>>>,
}

impl InMemoryZoneRepository {
    /// Creates a new empty in-memory zone repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a repository pre-populated with `zones`.
    #[must_use]
    pub fn with_zones(zones: impl IntoIterator<Item = ShippingZone>) -> Self {
        let storage = zones
            .into_iter()
            .map(|zone| (zone.id().clone(), zone))
            .collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Inserts or replaces a zone.
    pub async fn save(&self, zone: ShippingZone) {
        let mut storage = self.storage.write().await;
        storage.insert(zone.id().clone(), zone);
    }

    /// Returns the number of zones in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryZoneRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneRepository {
    async fn list_active_zones(&self) -> RepositoryResult<Vec<ShippingZone>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|zone| zone.is_active())
            .cloned()
            .collect())
    }
}

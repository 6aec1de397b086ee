//! # In-Memory Rate Repository
//!
//! In-memory implementation of [`RateRepository`] for tests and the CLI.

use crate::domain::entities::ShippingRate;
use crate::domain::value_objects::{MethodId, RateId, ZoneId};
use crate::infrastructure::persistence::traits::{RateRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`RateRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateRepository {
    storage: Arc<RwLock<HashMap<RateId, ShippingRate>>>,
}

impl InMemoryRateRepository {
    /// Creates a new empty in-memory rate repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `rates`.
    #[must_use]
    pub fn with_rates(rates: impl IntoIterator<Item = ShippingRate>) -> Self {
        let storage = rates
            .into_iter()
            .map(|rate| (rate.id().clone(), rate))
            .collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Inserts or replaces a rate.
    pub async fn save(&self, rate: ShippingRate) {
        let mut storage = self.storage.write().await;
        storage.insert(rate.id().clone(), rate);
    }

    /// Returns the number of rates in the repository.
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

#[async_trait]
impl RateRepository for InMemoryRateRepository {
    async fn list_active_rates(
        &self,
        method_id: &MethodId,
        zone_ids: &[ZoneId],
    ) -> RepositoryResult<Vec<ShippingRate>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|rate| rate.is_active())
            .filter(|rate| rate.shipping_method_id() == method_id)
            .filter(|rate| zone_ids.contains(rate.shipping_zone_id()))
            .cloned()
            .collect())
    }
}

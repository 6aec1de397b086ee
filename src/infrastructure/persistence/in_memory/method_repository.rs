//! # In-Memory Method Repository
//!
//! In-memory implementation of [`MethodRepository`] for tests and the CLI.

use crate::domain::entities::ShippingMethod;
use crate::domain::value_objects::MethodId;
use crate::infrastructure::persistence::traits::{MethodRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`MethodRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMethodRepository {
    storage: Arc<RwLock<HashMap<MethodId, ShippingMethod>>>,
}

impl InMemoryMethodRepository {
    /// Creates a new empty in-memory method repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `methods`.
    #[must_use]
    pub fn with_methods(methods: impl IntoIterator<Item = ShippingMethod>) -> Self {
        let storage = methods
            .into_iter()
            .map(|method| (method.id().clone(), method))
            .collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Inserts or replaces a method.
    pub async fn save(&self, method: ShippingMethod) {
        let mut storage = self.storage.write().await;
        storage.insert(method.id().clone(), method);
    }

    /// Returns the number of methods in the repository.
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
impl MethodRepository for InMemoryMethodRepository {
    async fn get_method(&self, id: &MethodId) -> RepositoryResult<Option<ShippingMethod>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn list_active_methods(&self) -> RepositoryResult<Vec<ShippingMethod>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|method| method.is_active())
            .cloned()
            .collect())
    }
}

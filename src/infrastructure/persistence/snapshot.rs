//! # Catalog Snapshot
//!
//! A complete shipping catalog (zones, methods, rates) as one JSON
//! document, used to seed the in-memory repositories.
//!
//! Field names follow the camelCase form used by the management
//! surfaces:
//!
//! ```json
//! {
//!   "zones":   [{ "id": "z-metro", "name": "Metro", "priority": 1,
//!                 "pincodeRanges": ["400001-400099"] }],
//!   "methods": [{ "id": "m-std", "name": "Standard", "code": "standard",
//!                 "baseRate": "5.99", "estimatedDays": 3 }],
//!   "rates":   [{ "id": "r-1", "name": "Metro light", "rate": "3.99",
//!                 "shippingMethodId": "m-std", "shippingZoneId": "z-metro",
//!                 "maxWeight": "5" }]
//! }
//! ```

use crate::domain::entities::{ShippingMethod, ShippingRate, ShippingZone};
use crate::domain::services::{ValidationIssue, validate_catalog};
use crate::infrastructure::persistence::in_memory::{
    InMemoryMethodRepository, InMemoryRateRepository, InMemoryZoneRepository,
};
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every catalog record, as read from a snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Shipping zones.
    #[serde(default)]
    pub zones: Vec<ShippingZone>,
    /// Shipping methods.
    #[serde(default)]
    pub methods: Vec<ShippingMethod>,
    /// Shipping rates.
    #[serde(default)]
    pub rates: Vec<ShippingRate>,
}

/// In-memory repositories seeded from a [`CatalogSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    /// Zone repository.
    pub zones: InMemoryZoneRepository,
    /// Method repository.
    pub methods: InMemoryMethodRepository,
    /// Rate repository.
    pub rates: InMemoryRateRepository,
}

impl CatalogSnapshot {
    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the document is not a
    /// valid snapshot.
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        serde_json::from_str(json).map_err(|e| RepositoryError::serialization(e.to_string()))
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the file cannot be read,
    /// or `RepositoryError::Serialization` if it does not parse.
    pub async fn load_from_path(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            RepositoryError::connection(format!("cannot read {}: {e}", path.display()))
        })?;
        let snapshot = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            zones = snapshot.zones.len(),
            methods = snapshot.methods.len(),
            rates = snapshot.rates.len(),
            "loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Returns every validation issue in the snapshot.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_catalog(&self.zones, &self.methods, &self.rates)
    }

    /// Moves the records into fresh in-memory repositories.
    #[must_use]
    pub fn into_repositories(self) -> InMemoryCatalog {
        InMemoryCatalog {
            zones: InMemoryZoneRepository::with_zones(self.zones),
            methods: InMemoryMethodRepository::with_methods(self.methods),
            rates: InMemoryRateRepository::with_rates(self.rates),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::MethodId;
    use crate::infrastructure::persistence::traits::{MethodRepository, ZoneRepository};

    const CATALOG: &str = r#"{
        "zones": [
            {"id": "z-metro", "name": "Metro", "priority": 1, "pincodeRanges": ["400001-400099"]},
            {"id": "z-old", "name": "Retired", "priority": 5, "pincodePatterns": ["9.*"], "isActive": false}
        ],
        "methods": [
            {"id": "m-std", "name": "Standard", "code": "standard", "baseRate": "5.99", "estimatedDays": 3}
        ],
        "rates": [
            {"id": "r-1", "name": "Metro light", "rate": "3.99",
             "shippingMethodId": "m-std", "shippingZoneId": "z-metro", "maxWeight": "5"}
        ]
    }"#;

    #[test]
    fn parses_camel_case_document() {
        let snapshot = CatalogSnapshot::from_json_str(CATALOG).unwrap();
        assert_eq!(snapshot.zones.len(), 2);
        assert_eq!(snapshot.methods.len(), 1);
        assert_eq!(snapshot.rates.len(), 1);
        assert!(snapshot.validate().is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = CatalogSnapshot::from_json_str("{}").unwrap();
        assert_eq!(snapshot, CatalogSnapshot::default());
    }

    #[test]
    fn malformed_document_is_serialization_error() {
        let err = CatalogSnapshot::from_json_str("{\"zones\": 3}").unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn validate_reports_dangling_rate() {
        let mut snapshot = CatalogSnapshot::from_json_str(CATALOG).unwrap();
        snapshot.methods.clear();
        let issues = snapshot.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "shippingMethodId");
    }

    #[tokio::test]
    async fn seeds_repositories() {
        let catalog = CatalogSnapshot::from_json_str(CATALOG)
            .unwrap()
            .into_repositories();
        assert_eq!(catalog.zones.len(), 2);
        assert_eq!(catalog.zones.list_active_zones().await.unwrap().len(), 1);
        assert!(
            catalog
                .methods
                .get_method(&MethodId::new("m-std"))
                .await
                .unwrap()
                .is_some()
        );
        assert_eq!(catalog.rates.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_connection_error() {
        let err = CatalogSnapshot::load_from_path("/nonexistent/catalog.json")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }
}

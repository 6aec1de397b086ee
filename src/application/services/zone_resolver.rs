//! # Zone Resolver
//!
//! Maps a destination postal code to the active zones that cover it.
//!
//! Zones are read once per call, compiled once, and matched against the
//! postal code (or every postal code of a batch). The result is ordered by
//! zone priority ascending with the zone id as tie-breaker, so identical
//! inputs over the same data always give the same list.

use crate::application::services::bounded_read::bounded;
use crate::domain::entities::ShippingZone;
use crate::domain::services::CompiledZone;
use crate::domain::value_objects::Pincode;
use crate::infrastructure::persistence::{RepositoryResult, ZoneRepository};
use std::sync::Arc;
use std::time::Duration;

/// Resolves postal codes to shipping zones.
#[derive(Debug, Clone)]
pub struct ZoneResolver {
    zones: Arc<dyn ZoneRepository>,
    read_timeout: Duration,
}

impl ZoneResolver {
    /// Creates a resolver reading zones from `zones`.
    #[must_use]
    pub fn new(zones: Arc<dyn ZoneRepository>, read_timeout: Duration) -> Self {
        Self {
            zones,
            read_timeout,
        }
    }

    /// Returns the active zones matching `pincode`, most specific first.
    ///
    /// An empty list means the destination is not served.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the zone read fails or times out.
    pub async fn resolve(&self, pincode: &Pincode) -> RepositoryResult<Vec<ShippingZone>> {
        let compiled = self.load_compiled().await?;
        let zones = matching(&compiled, pincode);
        tracing::debug!(
            pincode = %pincode,
            candidates = compiled.len(),
            matched = zones.len(),
            "resolved zones"
        );
        Ok(zones)
    }

    /// Resolves many postal codes against a single read of the zones.
    ///
    /// The result is positionally aligned with `pincodes`.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the zone read fails or times out.
    pub async fn resolve_batch(
        &self,
        pincodes: &[Pincode],
    ) -> RepositoryResult<Vec<Vec<ShippingZone>>> {
        let compiled = self.load_compiled().await?;
        tracing::debug!(
            pincodes = pincodes.len(),
            candidates = compiled.len(),
            "resolving zone batch"
        );
        Ok(pincodes
            .iter()
            .map(|pincode| matching(&compiled, pincode))
            .collect())
    }

    async fn load_compiled(&self) -> RepositoryResult<Vec<CompiledZone>> {
        let zones = bounded(
            "ShippingZone",
            self.read_timeout,
            self.zones.list_active_zones(),
        )
        .await?;

        let mut compiled: Vec<CompiledZone> = zones
            .into_iter()
            .filter(ShippingZone::is_active)
            .map(CompiledZone::compile)
            .collect();
        compiled.sort_by(|a, b| {
            a.zone()
                .priority()
                .cmp(&b.zone().priority())
                .then_with(|| a.zone().id().cmp(b.zone().id()))
        });
        Ok(compiled)
    }
}

fn matching(compiled: &[CompiledZone], pincode: &Pincode) -> Vec<ShippingZone> {
    compiled
        .iter()
        .filter(|zone| zone.matches(pincode.as_str()))
        .map(|zone| zone.zone().clone())
        .collect()
}

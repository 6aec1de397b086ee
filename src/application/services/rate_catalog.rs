//! # Rate Catalog
//!
//! Chooses the rate that governs a shipment for one method across a set
//! of candidate zones.
//!
//! The catalog never falls back to the method's base rate: "no
//! admissible rate" is reported as `None` and the caller decides what
//! that means.

use crate::application::services::bounded_read::bounded;
use crate::domain::entities::{ShippingRate, ShippingZone};
use crate::domain::services::{RankedRate, RateRankingStrategy, ZonePriorityFirst, rank_rates};
use crate::domain::value_objects::{MethodId, ResolutionContext, ZoneId};
use crate::infrastructure::persistence::{RateRepository, RepositoryResult};
use chrono::FixedOffset;
use std::sync::Arc;
use std::time::Duration;

/// Selects and ranks shipping rates.
#[derive(Debug, Clone)]
pub struct RateCatalog {
    rates: Arc<dyn RateRepository>,
    strategy: Arc<dyn RateRankingStrategy>,
    offset: FixedOffset,
    read_timeout: Duration,
}

impl RateCatalog {
    /// Creates a catalog using the [`ZonePriorityFirst`] ranking.
    #[must_use]
    pub fn new(rates: Arc<dyn RateRepository>, offset: FixedOffset, read_timeout: Duration) -> Self {
        Self {
            rates,
            strategy: Arc::new(ZonePriorityFirst::new()),
            offset,
            read_timeout,
        }
    }

    /// Replaces the ranking strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn RateRankingStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the name of the ranking strategy in use.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Returns the best admissible rate of `method_id` within `zones`.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the rate read fails or times out.
    pub async fn select_best_rate(
        &self,
        method_id: &MethodId,
        zones: &[ShippingZone],
        ctx: &ResolutionContext,
    ) -> RepositoryResult<Option<ShippingRate>> {
        let ranked = self.ranked_rates(method_id, zones, ctx).await?;
        Ok(ranked.into_iter().next().map(|best| best.rate))
    }

    /// Returns every admissible rate of `method_id` within `zones`, best
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the rate read fails or times out.
    pub async fn ranked_rates(
        &self,
        method_id: &MethodId,
        zones: &[ShippingZone],
        ctx: &ResolutionContext,
    ) -> RepositoryResult<Vec<RankedRate>> {
        if zones.is_empty() {
            return Ok(Vec::new());
        }

        let zone_ids: Vec<ZoneId> = zones.iter().map(|zone| zone.id().clone()).collect();
        let rates = bounded(
            "ShippingRate",
            self.read_timeout,
            self.rates.list_active_rates(method_id, &zone_ids),
        )
        .await?;

        let ranked = rank_rates(
            self.strategy.as_ref(),
            method_id,
            &rates,
            zones,
            ctx,
            &self.offset,
        );
        tracing::debug!(
            method = %method_id,
            loaded = rates.len(),
            admissible = ranked.len(),
            best = ranked.first().map(|r| r.rate.id().as_str()),
            strategy = self.strategy.name(),
            "ranked rates"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{RateConditions, TimeRange};
    use crate::domain::value_objects::Timestamp;
    use crate::infrastructure::persistence::RepositoryError;
    use crate::infrastructure::persistence::in_memory::InMemoryRateRepository;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::cmp::Ordering;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn zones() -> Vec<ShippingZone> {
        vec![
            ShippingZone::new("z-city", "City", 1).with_range("400001-400099"),
            ShippingZone::new("z-state", "State", 2).with_pattern(r"4\d{5}"),
        ]
    }

    // Friday
    fn ctx() -> ResolutionContext {
        ResolutionContext::new(Timestamp::parse_rfc3339("2026-10-16T10:30:00Z").unwrap())
    }

    fn rate(id: &str, method: &str, zone: &str, cents: i64) -> ShippingRate {
        ShippingRate::new(id, id, Decimal::new(cents, 2), method, zone)
    }

    fn catalog(rates: Vec<ShippingRate>) -> RateCatalog {
        RateCatalog::new(
            Arc::new(InMemoryRateRepository::with_rates(rates)),
            utc(),
            Duration::from_secs(1),
        )
    }

    #[derive(Debug)]
    struct FailingRateRepository;

    #[async_trait]
    impl RateRepository for FailingRateRepository {
        async fn list_active_rates(
            &self,
            _method_id: &MethodId,
            _zone_ids: &[ZoneId],
        ) -> RepositoryResult<Vec<ShippingRate>> {
            Err(RepositoryError::query("rates table missing"))
        }
    }

    /// Returns every stored rate regardless of the filter.
    #[derive(Debug)]
    struct UnfilteredRateRepository(Vec<ShippingRate>);

    #[async_trait]
    impl RateRepository for UnfilteredRateRepository {
        async fn list_active_rates(
            &self,
            _method_id: &MethodId,
            _zone_ids: &[ZoneId],
        ) -> RepositoryResult<Vec<ShippingRate>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct MostExpensiveFirst;

    impl RateRankingStrategy for MostExpensiveFirst {
        fn compare(&self, a: (&ShippingRate, i32), b: (&ShippingRate, i32)) -> Ordering {
            b.0.rate().cmp(&a.0.rate())
        }

        fn name(&self) -> &'static str {
            "MostExpensiveFirst"
        }
    }

    #[tokio::test]
    async fn weight_band_selects_rate() {
        let catalog = catalog(vec![
            rate("r-light", "m-std", "z-city", 399)
                .with_weight_band(Some(Decimal::ZERO), Some(Decimal::new(5, 0))),
        ]);
        let method = MethodId::new("m-std");

        let light = ctx().with_weight(Decimal::new(2, 0));
        let best = catalog.select_best_rate(&method, &zones(), &light).await.unwrap();
        assert_eq!(best.unwrap().rate(), Decimal::new(399, 2));

        let heavy = ctx().with_weight(Decimal::new(10, 0));
        assert!(catalog.select_best_rate(&method, &zones(), &heavy).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn other_methods_are_ignored() {
        let catalog = catalog(vec![rate("r-exp", "m-exp", "z-city", 100)]);
        let best = catalog
            .select_best_rate(&MethodId::new("m-std"), &zones(), &ctx())
            .await
            .unwrap();
        assert!(best.is_none());
    }

    #[tokio::test]
    async fn unfiltered_repository_rows_cannot_leak_across_methods() {
        let catalog = RateCatalog::new(
            Arc::new(UnfilteredRateRepository(vec![
                rate("r-exp", "m-exp", "z-city", 100),
                rate("r-std-inactive", "m-std", "z-city", 150).with_active(false),
                rate("r-std", "m-std", "z-city", 400),
            ])),
            utc(),
            Duration::from_secs(1),
        );
        let best = catalog
            .select_best_rate(&MethodId::new("m-std"), &zones(), &ctx())
            .await
            .unwrap();
        assert_eq!(best.unwrap().id().as_str(), "r-std");
    }

    #[tokio::test]
    async fn zone_priority_wins_over_cheaper_rate() {
        let catalog = catalog(vec![
            rate("r-state", "m-std", "z-state", 100),
            rate("r-city", "m-std", "z-city", 500),
        ]);
        let ranked = catalog
            .ranked_rates(&MethodId::new("m-std"), &zones(), &ctx())
            .await
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].rate.id().as_str(), "r-city");
        assert!(ranked[0].is_best());
    }

    #[tokio::test]
    async fn time_window_admission_uses_offset() {
        let evening = rate("r-evening", "m-std", "z-city", 100).with_conditions(RateConditions {
            time_ranges: vec![TimeRange::new(
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            )],
            ..Default::default()
        });
        let rates = Arc::new(InMemoryRateRepository::with_rates([evening]));
        let method = MethodId::new("m-std");

        // 10:30 UTC is 16:00 IST
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let in_ist = RateCatalog::new(rates.clone(), ist, Duration::from_secs(1));
        assert!(in_ist.select_best_rate(&method, &zones(), &ctx()).await.unwrap().is_some());

        let in_utc = RateCatalog::new(rates, utc(), Duration::from_secs(1));
        assert!(in_utc.select_best_rate(&method, &zones(), &ctx()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn no_candidate_zones_skips_read() {
        let catalog = RateCatalog::new(
            Arc::new(FailingRateRepository),
            utc(),
            Duration::from_secs(1),
        );
        let best = catalog
            .select_best_rate(&MethodId::new("m-std"), &[], &ctx())
            .await
            .unwrap();
        assert!(best.is_none());
    }

    #[tokio::test]
    async fn repository_failure_propagates() {
        let catalog = RateCatalog::new(
            Arc::new(FailingRateRepository),
            utc(),
            Duration::from_secs(1),
        );
        let err = catalog
            .select_best_rate(&MethodId::new("m-std"), &zones(), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn custom_strategy_is_used() {
        let catalog = catalog(vec![
            rate("r-cheap", "m-std", "z-city", 100),
            rate("r-dear", "m-std", "z-city", 900),
        ])
        .with_strategy(Arc::new(MostExpensiveFirst));
        assert_eq!(catalog.strategy_name(), "MostExpensiveFirst");
        let best = catalog
            .select_best_rate(&MethodId::new("m-std"), &zones(), &ctx())
            .await
            .unwrap();
        assert_eq!(best.unwrap().id().as_str(), "r-dear");
    }
}

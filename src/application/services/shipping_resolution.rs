//! # Shipping Resolution Service
//!
//! Entry point for checkout: lists the shipping options for a destination
//! and prices a chosen method.
//!
//! # Flow
//!
//! ```text
//! pincode ──► ZoneResolver ──► zones ──► RateCatalog ──► best rate?
//!                                                      │
//!                 method base rate / days ◄── None ────┤
//!                                                      ▼
//!                                              EtaCalculator ──► quote
//! ```
//!
//! The service holds no mutable state; share it across tasks behind an
//! `Arc`.

use crate::application::error::{ShippingError, ShippingResult};
use crate::application::services::bounded_read::bounded;
use crate::application::services::rate_catalog::RateCatalog;
use crate::application::services::zone_resolver::ZoneResolver;
use crate::domain::entities::{ShippingMethod, ShippingZone};
use crate::domain::services::{
    DeliveryEstimate, EtaCalculator, HolidayCalendar, RateRankingStrategy,
};
use crate::domain::value_objects::{
    DEFAULT_MAX_PINCODE_LENGTH, MethodId, Pincode, RateId, ResolutionContext,
};
use crate::infrastructure::persistence::{MethodRepository, RateRepository, ZoneRepository};
use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the resolution service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Upper bound on every repository read, in milliseconds.
    pub repository_timeout_ms: u64,
    /// Time reference for weekdays, time windows and delivery dates.
    pub offset: FixedOffset,
    /// Orders placed at or after this wall-clock time ship a day later.
    pub dispatch_cutoff: Option<NaiveTime>,
    /// Longest postal code accepted.
    pub max_pincode_length: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            repository_timeout_ms: 2000,
            offset: Utc.fix(),
            dispatch_cutoff: None,
            max_pincode_length: DEFAULT_MAX_PINCODE_LENGTH,
        }
    }
}

impl ResolutionConfig {
    /// Creates a configuration with the specified read timeout.
    #[must_use]
    pub fn with_timeout(repository_timeout_ms: u64) -> Self {
        Self {
            repository_timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the time reference.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the dispatch cutoff.
    #[must_use]
    pub fn with_dispatch_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.dispatch_cutoff = Some(cutoff);
        self
    }

    /// Sets the longest accepted postal code.
    #[must_use]
    pub fn with_max_pincode_length(mut self, max: usize) -> Self {
        self.max_pincode_length = max;
        self
    }

    /// Returns the read timeout as a duration.
    #[must_use]
    pub fn repository_timeout(&self) -> Duration {
        Duration::from_millis(self.repository_timeout_ms)
    }
}

/// Identifying details of a shipping method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSummary {
    /// Method identifier.
    pub id: MethodId,
    /// Display name.
    pub name: String,
    /// Method slug.
    pub code: String,
}

impl From<&ShippingMethod> for MethodSummary {
    fn from(method: &ShippingMethod) -> Self {
        Self {
            id: method.id().clone(),
            name: method.name().to_string(),
            code: method.code().to_string(),
        }
    }
}

/// One available shipping option for a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodQuote {
    /// The method offered.
    pub method: ShippingMethod,
    /// Price charged: the winning rate, else the method's base rate.
    pub rate: Decimal,
    /// The rate record applied, if any.
    pub applied_rate_id: Option<RateId>,
    /// Delivery estimate.
    pub eta: DeliveryEstimate,
}

/// Price and delivery estimate for a specific method and destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    /// The method priced.
    pub method: MethodSummary,
    /// Price charged: the winning rate, else the method's base rate.
    pub base_rate: Decimal,
    /// The rate record applied, if any.
    pub applied_rate_id: Option<RateId>,
    /// Delivery estimate.
    pub eta: DeliveryEstimate,
}

/// Price, rate id and estimate for one method.
struct Priced {
    price: Decimal,
    applied_rate_id: Option<RateId>,
    eta: DeliveryEstimate,
}

/// Resolves shipping options and prices.
#[derive(Debug, Clone)]
pub struct ShippingResolutionService {
    zone_resolver: ZoneResolver,
    rate_catalog: RateCatalog,
    methods: Arc<dyn MethodRepository>,
    eta: EtaCalculator,
    config: ResolutionConfig,
}

impl ShippingResolutionService {
    /// Creates a new service.
    #[must_use]
    pub fn new(
        zones: Arc<dyn ZoneRepository>,
        methods: Arc<dyn MethodRepository>,
        rates: Arc<dyn RateRepository>,
        calendar: Arc<dyn HolidayCalendar>,
        config: ResolutionConfig,
    ) -> Self {
        let read_timeout = config.repository_timeout();
        let mut eta = EtaCalculator::new(calendar, config.offset);
        if let Some(cutoff) = config.dispatch_cutoff {
            eta = eta.with_dispatch_cutoff(cutoff);
        }

        Self {
            zone_resolver: ZoneResolver::new(zones, read_timeout),
            rate_catalog: RateCatalog::new(rates, config.offset, read_timeout),
            methods,
            eta,
            config,
        }
    }

    /// Replaces the rate ranking strategy.
    #[must_use]
    pub fn with_ranking_strategy(mut self, strategy: Arc<dyn RateRankingStrategy>) -> Self {
        self.rate_catalog = self.rate_catalog.with_strategy(strategy);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Returns the zone resolver.
    #[must_use]
    pub fn zone_resolver(&self) -> &ZoneResolver {
        &self.zone_resolver
    }

    /// Lists every active method deliverable to `pincode`, cheapest first.
    ///
    /// An unserved destination yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// - `InvalidPincodeFormat` / `InvalidContext` for bad input
    /// - `RepositoryUnavailable` if a read fails or times out
    /// - `CalendarExhausted` if no delivery date can be placed
    pub async fn list_available_methods(
        &self,
        pincode: &str,
        ctx: &ResolutionContext,
    ) -> ShippingResult<Vec<MethodQuote>> {
        let pincode = self.prepare(pincode, ctx)?;

        let zones = self.zone_resolver.resolve(&pincode).await?;
        if zones.is_empty() {
            tracing::debug!(pincode = %pincode, "destination not served");
            return Ok(Vec::new());
        }

        let methods = bounded(
            "ShippingMethod",
            self.config.repository_timeout(),
            self.methods.list_active_methods(),
        )
        .await?;

        let priced = try_join_all(
            methods
                .iter()
                .filter(|method| method.is_active())
                .map(|method| self.price(method, &zones, ctx)),
        )
        .await?;

        let mut quotes: Vec<MethodQuote> = methods
            .into_iter()
            .filter(ShippingMethod::is_active)
            .zip(priced)
            .map(|(method, priced)| MethodQuote {
                method,
                rate: priced.price,
                applied_rate_id: priced.applied_rate_id,
                eta: priced.eta,
            })
            .collect();
        quotes.sort_by(|a, b| {
            a.rate
                .cmp(&b.rate)
                .then_with(|| a.method.id().cmp(b.method.id()))
        });

        tracing::debug!(
            pincode = %pincode,
            zones = zones.len(),
            methods = quotes.len(),
            "listed available methods"
        );
        Ok(quotes)
    }

    /// Prices `method_id` for delivery to `pincode`.
    ///
    /// # Errors
    ///
    /// - `InvalidPincodeFormat` / `InvalidContext` for bad input
    /// - `MethodNotFound` if no such method exists
    /// - `MethodDisabled` if the method is inactive
    /// - `NoServiceableZone` if no active zone covers `pincode`
    /// - `RepositoryUnavailable` if a read fails or times out
    /// - `CalendarExhausted` if no delivery date can be placed
    pub async fn calculate_shipping(
        &self,
        method_id: &MethodId,
        pincode: &str,
        ctx: &ResolutionContext,
    ) -> ShippingResult<ShippingQuote> {
        let pincode = self.prepare(pincode, ctx)?;

        let method = bounded(
            "ShippingMethod",
            self.config.repository_timeout(),
            self.methods.get_method(method_id),
        )
        .await?
        .ok_or_else(|| ShippingError::method_not_found(method_id.clone()))?;
        if !method.is_active() {
            tracing::debug!(method = %method_id, "method is disabled");
            return Err(ShippingError::method_disabled(method_id.clone()));
        }

        let zones = self.zone_resolver.resolve(&pincode).await?;
        if zones.is_empty() {
            return Err(ShippingError::no_serviceable_zone(pincode.as_str()));
        }

        let priced = self.price(&method, &zones, ctx).await?;
        tracing::debug!(
            method = %method_id,
            pincode = %pincode,
            price = %priced.price,
            rate = priced.applied_rate_id.as_ref().map(RateId::as_str),
            "calculated shipping"
        );

        Ok(ShippingQuote {
            method: MethodSummary::from(&method),
            base_rate: priced.price,
            applied_rate_id: priced.applied_rate_id,
            eta: priced.eta,
        })
    }

    fn prepare(&self, pincode: &str, ctx: &ResolutionContext) -> ShippingResult<Pincode> {
        ctx.validate()?;
        Ok(Pincode::parse_with_max_length(
            pincode,
            self.config.max_pincode_length,
        )?)
    }

    async fn price(
        &self,
        method: &ShippingMethod,
        zones: &[ShippingZone],
        ctx: &ResolutionContext,
    ) -> ShippingResult<Priced> {
        let best = self
            .rate_catalog
            .select_best_rate(method.id(), zones, ctx)
            .await?;

        let (price, days, applied_rate_id) = match best {
            Some(rate) => (
                rate.rate(),
                rate.estimated_days().unwrap_or(method.estimated_days()),
                Some(rate.id().clone()),
            ),
            None => (method.base_rate(), method.estimated_days(), None),
        };
        let eta = self.eta.estimate(days, ctx.as_of())?;

        Ok(Priced {
            price,
            applied_rate_id,
            eta,
        })
    }
}

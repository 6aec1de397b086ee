//! # Rate Ranking
//!
//! Admission filtering and ordering of candidate shipping rates.
//!
//! This module provides the [`RateRankingStrategy`] trait and the
//! [`ZonePriorityFirst`] strategy used by the rate catalog.
//!
//! # Ranking Order
//!
//! ```text
//! 1. zone priority      ascending  (more specific zone wins)
//! 2. rate value         ascending  (cheapest wins)
//! 3. specificity        descending (narrower override wins)
//! 4. rate id            ascending
//! ```

use crate::domain::entities::{ShippingRate, ShippingZone};
use crate::domain::value_objects::{MethodId, ResolutionContext, ZoneId};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use std::fmt;

/// An admissible rate with its ranking information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRate {
    /// The rate being ranked.
    pub rate: ShippingRate,
    /// Priority of the zone the rate is attached to.
    pub zone_priority: i32,
    /// The rank (1 = best).
    pub rank: usize,
}

impl RankedRate {
    /// Returns true if this rate is the winner (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RankedRate(#{} zone_priority={} rate={})",
            self.rank, self.zone_priority, self.rate
        )
    }
}

/// Trait for ordering admissible rates.
pub trait RateRankingStrategy: Send + Sync + fmt::Debug {
    /// Compares two admissible rates; `Ordering::Less` means `a` is better.
    fn compare(&self, a: (&ShippingRate, i32), b: (&ShippingRate, i32)) -> Ordering;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Zone priority, then price, then specificity, then id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZonePriorityFirst;

impl ZonePriorityFirst {
    /// Creates the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RateRankingStrategy for ZonePriorityFirst {
    fn compare(&self, a: (&ShippingRate, i32), b: (&ShippingRate, i32)) -> Ordering {
        let key = |(rate, priority): (&ShippingRate, i32)| {
            (priority, rate.rate(), Reverse(rate.specificity()))
        };
        key(a)
            .cmp(&key(b))
            .then_with(|| a.0.id().cmp(b.0.id()))
    }

    fn name(&self) -> &'static str {
        "ZonePriorityFirst"
    }
}

/// Filters `rates` down to those admitted by `ctx` and ranks them.
///
/// Rates that are inactive, belong to another method, or are attached to
/// a zone outside `zones` are dropped before admission is checked.
#[must_use]
pub fn rank_rates(
    strategy: &dyn RateRankingStrategy,
    method_id: &MethodId,
    rates: &[ShippingRate],
    zones: &[ShippingZone],
    ctx: &ResolutionContext,
    offset: &FixedOffset,
) -> Vec<RankedRate> {
    let priorities: HashMap<&ZoneId, i32> = zones
        .iter()
        .map(|zone| (zone.id(), zone.priority()))
        .collect();

    let mut admissible: Vec<(&ShippingRate, i32)> = rates
        .iter()
        .filter(|rate| rate.is_active() && rate.shipping_method_id() == method_id)
        .filter_map(|rate| {
            priorities
                .get(rate.shipping_zone_id())
                .map(|priority| (rate, *priority))
        })
        .filter(|(rate, _)| rate.admits(ctx, offset))
        .collect();

    admissible.sort_by(|a, b| strategy.compare(*a, *b));

    admissible
        .into_iter()
        .enumerate()
        .map(|(index, (rate, zone_priority))| RankedRate {
            rate: rate.clone(),
            zone_priority,
            rank: index + 1,
        })
        .collect()
}

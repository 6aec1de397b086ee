//! # Shipping Rate Entity
//!
//! A priced refinement of one (method, zone) pair.
//!
//! This module provides the [`ShippingRate`] entity together with its
//! optional [`RateConditions`] qualifier and the band checks that decide
//! whether a rate admits a given shipment.
//!
//! # Band Semantics
//!
//! ```text
//! min <= value            (unset min behaves as no lower bound)
//! value <= max            (unset or zero max means unbounded)
//! ```
//!
//! A context without a weight (or order value) is admitted by every
//! weight (or order-value) band.
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use shipping_resolver::domain::entities::ShippingRate;
//!
//! let rate = ShippingRate::new("r-light", "Light parcels", Decimal::new(399, 2), "m-std", "zone-1")
//!     .with_weight_band(Some(Decimal::ZERO), Some(Decimal::new(5, 0)));
//!
//! assert!(rate.admits_weight(Some(Decimal::new(2, 0))));
//! assert!(!rate.admits_weight(Some(Decimal::new(10, 0))));
//! assert!(rate.admits_weight(None));
//! ```

use crate::domain::value_objects::{MethodId, RateId, ResolutionContext, ZoneId};
use chrono::{FixedOffset, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A wall-clock window, inclusive start and exclusive end.
///
/// A window whose end is not after its start wraps past midnight, so
/// `22:00-06:00` covers the night and `00:00-00:00` covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the window (inclusive).
    pub start: NaiveTime,
    /// End of the window (exclusive).
    pub end: NaiveTime,
}

impl TimeRange {
    /// Creates a new window.
    #[must_use]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Returns true if the window wraps past midnight.
    #[inline]
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Returns true if `time` falls inside the window.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.wraps_midnight() {
            time >= self.start || time < self.end
        } else {
            time >= self.start && time < self.end
        }
    }
}

/// Optional qualifiers narrowing when a rate applies.
///
/// Every empty list means "no restriction" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConditions {
    /// Product categories; at least one cart category must be listed.
    #[serde(default)]
    pub product_categories: BTreeSet<String>,
    /// Customer groups; the customer's group must be listed.
    #[serde(default)]
    pub customer_groups: BTreeSet<String>,
    /// Weekdays, Sunday = 0.
    #[serde(default)]
    pub weekdays: BTreeSet<u8>,
    /// Wall-clock windows.
    #[serde(default)]
    pub time_ranges: Vec<TimeRange>,
}

impl RateConditions {
    /// Returns the number of non-empty qualifier lists.
    #[must_use]
    pub fn specificity(&self) -> usize {
        [
            !self.product_categories.is_empty(),
            !self.customer_groups.is_empty(),
            !self.weekdays.is_empty(),
            !self.time_ranges.is_empty(),
        ]
        .into_iter()
        .filter(|restricted| *restricted)
        .count()
    }

    /// Returns true if every qualifier admits the context.
    ///
    /// Weekday and time-of-day are read from the context's as-of
    /// timestamp in the `offset` time reference.
    #[must_use]
    pub fn admits(&self, ctx: &ResolutionContext, offset: &FixedOffset) -> bool {
        if !self.product_categories.is_empty()
            && self
                .product_categories
                .is_disjoint(ctx.product_categories())
        {
            return false;
        }

        if !self.customer_groups.is_empty() {
            match ctx.customer_group() {
                Some(group) if self.customer_groups.contains(group) => {}
                _ => return false,
            }
        }

        if !self.weekdays.is_empty()
            && !self.weekdays.contains(&ctx.as_of().weekday_index(offset))
        {
            return false;
        }

        if !self.time_ranges.is_empty() {
            let time = ctx.as_of().local_time(offset);
            if !self.time_ranges.iter().any(|range| range.contains(time)) {
                return false;
            }
        }

        true
    }
}

/// Returns true if `value` lies within a `[min, max]` band.
///
/// An unset value is always admitted; an unset or zero `max` is unbounded.
#[must_use]
pub fn band_admits(min: Option<Decimal>, max: Option<Decimal>, value: Option<Decimal>) -> bool {
    let Some(value) = value else {
        return true;
    };
    if min.is_some_and(|min| value < min) {
        return false;
    }
    match max {
        Some(max) if !max.is_zero() => value <= max,
        _ => true,
    }
}

/// A shipping rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRate {
    id: RateId,
    name: String,
    rate: Decimal,
    shipping_method_id: MethodId,
    shipping_zone_id: ZoneId,
    #[serde(default)]
    min_weight: Option<Decimal>,
    #[serde(default)]
    max_weight: Option<Decimal>,
    #[serde(default)]
    min_order_value: Option<Decimal>,
    #[serde(default)]
    max_order_value: Option<Decimal>,
    #[serde(default)]
    estimated_days: Option<u32>,
    #[serde(default)]
    conditions: Option<RateConditions>,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ShippingRate {
    /// Creates an active, unbanded rate for a (method, zone) pair.
    #[must_use]
    pub fn new(
        id: impl Into<RateId>,
        name: impl Into<String>,
        rate: Decimal,
        method_id: impl Into<MethodId>,
        zone_id: impl Into<ZoneId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rate,
            shipping_method_id: method_id.into(),
            shipping_zone_id: zone_id.into(),
            min_weight: None,
            max_weight: None,
            min_order_value: None,
            max_order_value: None,
            estimated_days: None,
            conditions: None,
            is_active: true,
        }
    }

    /// Sets the weight band in kilograms.
    #[must_use]
    pub fn with_weight_band(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    /// Sets the order-value band.
    #[must_use]
    pub fn with_order_value_band(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_order_value = min;
        self.max_order_value = max;
        self
    }

    /// Overrides the method's transit time.
    #[must_use]
    pub fn with_estimated_days(mut self, days: u32) -> Self {
        self.estimated_days = Some(days);
        self
    }

    /// Attaches contextual qualifiers.
    #[must_use]
    pub fn with_conditions(mut self, conditions: RateConditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Sets whether the rate is in force.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Returns the rate identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RateId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the method this rate refines.
    #[inline]
    #[must_use]
    pub fn shipping_method_id(&self) -> &MethodId {
        &self.shipping_method_id
    }

    /// Returns the zone this rate refines.
    #[inline]
    #[must_use]
    pub fn shipping_zone_id(&self) -> &ZoneId {
        &self.shipping_zone_id
    }

    /// Returns the weight band.
    #[must_use]
    pub fn weight_band(&self) -> (Option<Decimal>, Option<Decimal>) {
        (self.min_weight, self.max_weight)
    }

    /// Returns the order-value band.
    #[must_use]
    pub fn order_value_band(&self) -> (Option<Decimal>, Option<Decimal>) {
        (self.min_order_value, self.max_order_value)
    }

    /// Returns the transit-time override, if any.
    #[inline]
    #[must_use]
    pub fn estimated_days(&self) -> Option<u32> {
        self.estimated_days
    }

    /// Returns the contextual qualifiers, if any.
    #[inline]
    #[must_use]
    pub fn conditions(&self) -> Option<&RateConditions> {
        self.conditions.as_ref()
    }

    /// Returns true if the rate is in force.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the number of non-empty condition lists.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.conditions
            .as_ref()
            .map_or(0, RateConditions::specificity)
    }

    /// Returns true if the weight band admits `weight`.
    #[must_use]
    pub fn admits_weight(&self, weight: Option<Decimal>) -> bool {
        band_admits(self.min_weight, self.max_weight, weight)
    }

    /// Returns true if the order-value band admits `value`.
    #[must_use]
    pub fn admits_order_value(&self, value: Option<Decimal>) -> bool {
        band_admits(self.min_order_value, self.max_order_value, value)
    }

    /// Returns true if every band and condition admits the context.
    #[must_use]
    pub fn admits(&self, ctx: &ResolutionContext, offset: &FixedOffset) -> bool {
        self.admits_weight(ctx.weight())
            && self.admits_order_value(ctx.order_value())
            && self
                .conditions
                .as_ref()
                .is_none_or(|conditions| conditions.admits(ctx, offset))
    }
}

impl fmt::Display for ShippingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate({} {}@{} = {})",
            self.id, self.shipping_method_id, self.shipping_zone_id, self.rate
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Timestamp;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // Friday 2026-10-16 10:30 UTC
    fn friday_morning() -> ResolutionContext {
        ResolutionContext::new(Timestamp::parse_rfc3339("2026-10-16T10:30:00Z").unwrap())
    }

    fn base_rate() -> ShippingRate {
        ShippingRate::new("r1", "Rate", Decimal::new(399, 2), "m1", "z1")
    }

    mod bands {
        use super::*;

        #[test]
        fn unset_value_always_admitted() {
            assert!(band_admits(Some(Decimal::TEN), Some(Decimal::TEN), None));
        }

        #[test]
        fn inclusive_bounds() {
            let min = Some(Decimal::ONE);
            let max = Some(Decimal::TEN);
            assert!(band_admits(min, max, Some(Decimal::ONE)));
            assert!(band_admits(min, max, Some(Decimal::TEN)));
            assert!(!band_admits(min, max, Some(Decimal::new(1001, 2))));
            assert!(!band_admits(min, max, Some(Decimal::new(99, 2))));
        }

        #[test]
        fn zero_max_is_unbounded() {
            assert!(band_admits(None, Some(Decimal::ZERO), Some(Decimal::new(10_000, 0))));
            assert!(band_admits(None, None, Some(Decimal::new(10_000, 0))));
        }

        #[test]
        fn order_value_band_is_symmetric() {
            let rate = base_rate().with_order_value_band(Some(Decimal::new(50, 0)), None);
            assert!(!rate.admits_order_value(Some(Decimal::new(49, 0))));
            assert!(rate.admits_order_value(Some(Decimal::new(50, 0))));
            assert!(rate.admits_order_value(None));
        }
    }

    mod time_ranges {
        use super::*;

        #[test]
        fn start_inclusive_end_exclusive() {
            let range = TimeRange::new(hm(9, 0), hm(17, 0));
            assert!(range.contains(hm(9, 0)));
            assert!(range.contains(hm(16, 59)));
            assert!(!range.contains(hm(17, 0)));
            assert!(!range.wraps_midnight());
        }

        #[test]
        fn overnight_window_wraps() {
            let range = TimeRange::new(hm(22, 0), hm(6, 0));
            assert!(range.wraps_midnight());
            assert!(range.contains(hm(23, 0)));
            assert!(range.contains(hm(5, 59)));
            assert!(!range.contains(hm(6, 0)));
            assert!(!range.contains(hm(12, 0)));
        }

        #[test]
        fn equal_bounds_cover_whole_day() {
            let range = TimeRange::new(hm(0, 0), hm(0, 0));
            assert!(range.contains(hm(0, 0)));
            assert!(range.contains(hm(13, 37)));
        }
    }

    mod conditions {
        use super::*;

        #[test]
        fn specificity_counts_non_empty_lists() {
            let mut conditions = RateConditions::default();
            assert_eq!(conditions.specificity(), 0);
            conditions.weekdays.insert(5);
            conditions.customer_groups.insert("vip".to_string());
            assert_eq!(conditions.specificity(), 2);
            assert_eq!(base_rate().with_conditions(conditions).specificity(), 2);
            assert_eq!(base_rate().specificity(), 0);
        }

        #[test]
        fn categories_need_intersection() {
            let conditions = RateConditions {
                product_categories: ["fragile".to_string()].into(),
                ..Default::default()
            };
            assert!(!conditions.admits(&friday_morning(), &utc()));
            assert!(!conditions.admits(&friday_morning().with_category("books"), &utc()));
            assert!(conditions.admits(
                &friday_morning().with_categories(["books", "fragile"]),
                &utc()
            ));
        }

        #[test]
        fn customer_group_must_be_member() {
            let conditions = RateConditions {
                customer_groups: ["wholesale".to_string()].into(),
                ..Default::default()
            };
            assert!(!conditions.admits(&friday_morning(), &utc()));
            assert!(!conditions.admits(&friday_morning().with_customer_group("retail"), &utc()));
            assert!(conditions.admits(&friday_morning().with_customer_group("wholesale"), &utc()));
        }

        #[test]
        fn weekday_uses_time_reference() {
            let conditions = RateConditions {
                weekdays: [5].into(),
                ..Default::default()
            };
            assert!(conditions.admits(&friday_morning(), &utc()));
            // 10:30 UTC is already Saturday at UTC+14
            let kiritimati = FixedOffset::east_opt(14 * 3600).unwrap();
            assert!(!conditions.admits(&friday_morning(), &kiritimati));
        }

        #[test]
        fn any_time_range_suffices() {
            let conditions = RateConditions {
                time_ranges: vec![
                    TimeRange::new(hm(6, 0), hm(8, 0)),
                    TimeRange::new(hm(10, 0), hm(11, 0)),
                ],
                ..Default::default()
            };
            assert!(conditions.admits(&friday_morning(), &utc()));

            let evening = RateConditions {
                time_ranges: vec![TimeRange::new(hm(18, 0), hm(23, 0))],
                ..Default::default()
            };
            assert!(!evening.admits(&friday_morning(), &utc()));
        }
    }

    #[test]
    fn admits_combines_bands_and_conditions() {
        let rate = base_rate()
            .with_weight_band(None, Some(Decimal::new(5, 0)))
            .with_conditions(RateConditions {
                weekdays: [1, 2, 3, 4, 5].into(),
                ..Default::default()
            });
        let ctx = friday_morning().with_weight(Decimal::new(3, 0));
        assert!(rate.admits(&ctx, &utc()));

        let heavy = friday_morning().with_weight(Decimal::new(6, 0));
        assert!(!rate.admits(&heavy, &utc()));
    }

    #[test]
    fn deserialize_conditions() {
        let json = r#"{
            "id": "r-vip",
            "name": "VIP weekday",
            "rate": "0",
            "shippingMethodId": "m1",
            "shippingZoneId": "z1",
            "estimatedDays": 1,
            "conditions": {
                "customerGroups": ["vip"],
                "timeRanges": [{"start": "09:00:00", "end": "17:00:00"}]
            }
        }"#;
        let rate: ShippingRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.specificity(), 2);
        assert_eq!(rate.estimated_days(), Some(1));
        assert!(rate.is_active());
        assert_eq!(rate.weight_band(), (None, None));
    }
}

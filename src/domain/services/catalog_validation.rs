//! # Catalog Validation
//!
//! Write-side checks for shipping catalog records.
//!
//! Resolution tolerates broken configuration; management surfaces should
//! not let it in. These checks collect every issue found so an editor
//! can report them together.
//!
//! # Examples
//!
//! ```
//! use shipping_resolver::domain::entities::ShippingZone;
//! use shipping_resolver::domain::services::catalog_validation::validate_zone;
//!
//! let zone = ShippingZone::new("zone-1", "Metro", 1).with_range("400099-400001");
//! let issues = validate_zone(&zone);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].field, "pincodeRanges");
//! ```

use crate::domain::entities::{ShippingMethod, ShippingRate, ShippingZone};
use crate::domain::services::pincode_matcher::{PincodeRange, compile_pattern};
use crate::domain::value_objects::{MethodId, ZoneId};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A single problem found in a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Kind of record ("zone", "method", "rate").
    pub entity: &'static str,
    /// Identifier of the record.
    pub id: String,
    /// Offending field.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn new(
        entity: &'static str,
        id: impl fmt::Display,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            id: id.to_string(),
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}: {}",
            self.entity, self.id, self.field, self.message
        )
    }
}

/// Checks a zone's patterns, ranges and name.
#[must_use]
pub fn validate_zone(zone: &ShippingZone) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if zone.name().trim().is_empty() {
        issues.push(ValidationIssue::new("zone", zone.id(), "name", "must not be empty"));
    }

    for pattern in zone.pincode_patterns() {
        if let Err(e) = compile_pattern(pattern) {
            issues.push(ValidationIssue::new(
                "zone",
                zone.id(),
                "pincodePatterns",
                format!("{pattern:?} is not a valid regular expression: {e}"),
            ));
        }
    }

    for range in zone.pincode_ranges() {
        if PincodeRange::parse(range).is_none() {
            issues.push(ValidationIssue::new(
                "zone",
                zone.id(),
                "pincodeRanges",
                format!("{range:?} is not a numeric \"<low>-<high>\" range with low <= high"),
            ));
        }
    }

    issues
}

/// Checks a method's code and base rate.
#[must_use]
pub fn validate_method(method: &ShippingMethod) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if method.code().trim().is_empty() {
        issues.push(ValidationIssue::new("method", method.id(), "code", "must not be empty"));
    }
    if method.base_rate() < Decimal::ZERO {
        issues.push(ValidationIssue::new(
            "method",
            method.id(),
            "baseRate",
            "must not be negative",
        ));
    }

    issues
}

/// Checks a rate's bands, conditions and references.
#[must_use]
pub fn validate_rate(
    rate: &ShippingRate,
    zone_ids: &HashSet<&ZoneId>,
    method_ids: &HashSet<&MethodId>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |field: &'static str, message: String| {
        issues.push(ValidationIssue::new("rate", rate.id(), field, message));
    };

    if rate.rate() < Decimal::ZERO {
        push("rate", "must not be negative".to_string());
    }
    if !zone_ids.contains(rate.shipping_zone_id()) {
        push(
            "shippingZoneId",
            format!("references unknown zone {}", rate.shipping_zone_id()),
        );
    }
    if !method_ids.contains(rate.shipping_method_id()) {
        push(
            "shippingMethodId",
            format!("references unknown method {}", rate.shipping_method_id()),
        );
    }

    for (field, (min, max)) in [
        ("weight", rate.weight_band()),
        ("orderValue", rate.order_value_band()),
    ] {
        if min.is_some_and(|v| v < Decimal::ZERO) || max.is_some_and(|v| v < Decimal::ZERO) {
            push(field, "bounds must not be negative".to_string());
        }
        if let (Some(min), Some(max)) = (min, max) {
            if !max.is_zero() && min > max {
                push(field, format!("minimum {min} exceeds maximum {max}"));
            }
        }
    }

    if let Some(conditions) = rate.conditions() {
        if let Some(day) = conditions.weekdays.iter().find(|day| **day > 6) {
            push("conditions.weekdays", format!("{day} is outside 0-6"));
        }
    }

    issues
}

/// Checks a whole catalog, including duplicate method codes.
#[must_use]
pub fn validate_catalog(
    zones: &[ShippingZone],
    methods: &[ShippingMethod],
    rates: &[ShippingRate],
) -> Vec<ValidationIssue> {
    let zone_ids: HashSet<&ZoneId> = zones.iter().map(ShippingZone::id).collect();
    let method_ids: HashSet<&MethodId> = methods.iter().map(ShippingMethod::id).collect();

    let mut issues: Vec<ValidationIssue> = zones.iter().flat_map(validate_zone).collect();
    issues.extend(methods.iter().flat_map(validate_method));

    let mut codes: HashMap<&str, &MethodId> = HashMap::new();
    for method in methods {
        if let Some(first) = codes.insert(method.code(), method.id()) {
            issues.push(ValidationIssue::new(
                "method",
                method.id(),
                "code",
                format!("code {:?} already used by {first}", method.code()),
            ));
        }
    }

    issues.extend(
        rates
            .iter()
            .flat_map(|rate| validate_rate(rate, &zone_ids, &method_ids)),
    );
    issues
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::RateConditions;

    fn zones() -> Vec<ShippingZone> {
        vec![ShippingZone::new("z1", "Metro", 1).with_range("400001-400099")]
    }

    fn methods() -> Vec<ShippingMethod> {
        vec![ShippingMethod::new("m1", "Standard", "standard", Decimal::new(599, 2), 3)]
    }

    fn valid_rate() -> ShippingRate {
        ShippingRate::new("r1", "Light", Decimal::new(399, 2), "m1", "z1")
            .with_weight_band(Some(Decimal::ZERO), Some(Decimal::new(5, 0)))
    }

    #[test]
    fn valid_catalog_has_no_issues() {
        assert!(validate_catalog(&zones(), &methods(), &[valid_rate()]).is_empty());
    }

    #[test]
    fn bad_pattern_reported() {
        let zone = ShippingZone::new("z", "Z", 1).with_pattern("(");
        let issues = validate_zone(&zone);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "pincodePatterns");
    }

    #[test]
    fn blank_zone_name_reported() {
        let zone = ShippingZone::new("z", "  ", 1).with_range("1-2");
        assert_eq!(validate_zone(&zone)[0].field, "name");
    }

    #[test]
    fn method_checks() {
        let method = ShippingMethod::new("m", "M", "", Decimal::new(-1, 0), 1);
        let fields: Vec<_> = validate_method(&method).iter().map(|i| i.field).collect();
        assert_eq!(fields, ["code", "baseRate"]);
    }

    #[test]
    fn duplicate_method_code_reported() {
        let mut all = methods();
        all.push(ShippingMethod::new("m2", "Standard again", "standard", Decimal::ONE, 3));
        let issues = validate_catalog(&zones(), &all, &[]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("m1"));
    }

    #[test]
    fn dangling_references_reported() {
        let rate = ShippingRate::new("r", "R", Decimal::ONE, "ghost-method", "ghost-zone");
        let issues = validate_catalog(&zones(), &methods(), &[rate]);
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, ["shippingZoneId", "shippingMethodId"]);
    }

    #[test]
    fn inverted_band_reported_unless_max_is_zero() {
        let inverted = valid_rate().with_weight_band(Some(Decimal::TEN), Some(Decimal::ONE));
        let issues = validate_catalog(&zones(), &methods(), &[inverted]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "weight");

        let unbounded = valid_rate().with_order_value_band(Some(Decimal::TEN), Some(Decimal::ZERO));
        assert!(validate_catalog(&zones(), &methods(), &[unbounded]).is_empty());
    }

    #[test]
    fn weekday_out_of_range_reported() {
        let rate = valid_rate().with_conditions(RateConditions {
            weekdays: [1, 7].into(),
            ..Default::default()
        });
        let issues = validate_catalog(&zones(), &methods(), &[rate]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().contains("7 is outside 0-6"));
    }
}

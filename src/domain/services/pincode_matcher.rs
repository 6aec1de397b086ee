//! # Pincode Matcher
//!
//! Decides whether a postal code belongs to a shipping zone.
//!
//! Zone rules are compiled once into a [`CompiledZone`] and then reused
//! for every postal code of a resolution batch, so matching cost stays
//! linear in the number of zones.
//!
//! # Matching Rules
//!
//! ```text
//! excluded_pincodes ∋ code        → no match
//! any pattern fully matches code  → match
//! any range low <= code <= high   → match
//! otherwise                       → no match
//! ```
//!
//! Broken configuration never aborts matching: an invalid regex or an
//! unparsable range is skipped with a warning and the zone's remaining
//! rules still apply.
//!
//! # Examples
//!
//! ```
//! use shipping_resolver::domain::entities::ShippingZone;
//! use shipping_resolver::domain::services::pincode_matcher::{CompiledZone, matches};
//!
//! let zone = ShippingZone::new("zone-1", "Metro", 1)
//!     .with_range("400001-400099")
//!     .with_excluded("400050");
//!
//! assert!(matches("400010", &zone));
//! assert!(!matches("400050", &zone));
//!
//! let compiled = CompiledZone::compile(zone);
//! assert!(compiled.matches("400099"));
//! assert!(!compiled.matches("400100"));
//! ```

use crate::domain::entities::ShippingZone;
use crate::domain::value_objects::pincode::parse_numeric;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Compiled size limit for a single zone pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// An inclusive numeric postal-code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PincodeRange {
    low: u64,
    high: u64,
}

impl PincodeRange {
    /// Parses a `"<low>-<high>"` range.
    ///
    /// Returns `None` when the string is malformed or `low > high`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shipping_resolver::domain::services::pincode_matcher::PincodeRange;
    ///
    /// let range = PincodeRange::parse(" 400001 - 400099 ").unwrap();
    /// assert!(range.contains(400050));
    /// assert!(PincodeRange::parse("400099-400001").is_none());
    /// assert!(PincodeRange::parse("abc").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (low, high) = raw.split_once('-')?;
        let low = parse_numeric(low.trim())?;
        let high = parse_numeric(high.trim())?;
        (low <= high).then_some(Self { low, high })
    }

    /// Returns true if `code` lies within the range.
    #[inline]
    #[must_use]
    pub fn contains(&self, code: u64) -> bool {
        self.low <= code && code <= self.high
    }

    /// Returns the lower bound.
    #[inline]
    #[must_use]
    pub fn low(&self) -> u64 {
        self.low
    }

    /// Returns the upper bound.
    #[inline]
    #[must_use]
    pub fn high(&self) -> u64 {
        self.high
    }
}

impl fmt::Display for PincodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Compiles a zone pattern so that it must match the whole postal code.
///
/// # Errors
///
/// Returns the regex error when the pattern does not compile.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
}

/// A zone with its matching rules compiled.
#[derive(Debug, Clone)]
pub struct CompiledZone {
    zone: ShippingZone,
    patterns: Vec<Regex>,
    ranges: Vec<PincodeRange>,
}

impl CompiledZone {
    /// Compiles the zone's patterns and ranges, skipping broken entries.
    #[must_use]
    pub fn compile(zone: ShippingZone) -> Self {
        let patterns = zone
            .pincode_patterns()
            .iter()
            .filter_map(|pattern| match compile_pattern(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(
                        zone = %zone.id(),
                        pattern = %pattern,
                        error = %e,
                        "skipping invalid pincode pattern"
                    );
                    None
                }
            })
            .collect();

        let ranges = zone
            .pincode_ranges()
            .iter()
            .filter_map(|raw| {
                let parsed = PincodeRange::parse(raw);
                if parsed.is_none() {
                    tracing::warn!(zone = %zone.id(), range = %raw, "skipping malformed pincode range");
                }
                parsed
            })
            .collect();

        Self {
            zone,
            patterns,
            ranges,
        }
    }

    /// Returns true if the postal code belongs to the zone.
    #[must_use]
    pub fn matches(&self, pincode: &str) -> bool {
        if self.zone.is_excluded(pincode) {
            return false;
        }
        if self.patterns.iter().any(|regex| regex.is_match(pincode)) {
            return true;
        }
        match parse_numeric(pincode) {
            Some(code) => self.ranges.iter().any(|range| range.contains(code)),
            None => false,
        }
    }

    /// Returns the underlying zone.
    #[inline]
    #[must_use]
    pub fn zone(&self) -> &ShippingZone {
        &self.zone
    }

    /// Consumes the compiled form and returns the zone.
    #[must_use]
    pub fn into_zone(self) -> ShippingZone {
        self.zone
    }

    /// Returns the number of usable rules after compilation.
    #[must_use]
    pub fn usable_rules(&self) -> usize {
        self.patterns.len() + self.ranges.len()
    }
}

/// Returns true if `pincode` matches `zone`.
///
/// Compiles the zone on every call; use [`CompiledZone`] when matching
/// many postal codes against the same zones.
#[must_use]
pub fn matches(pincode: &str, zone: &ShippingZone) -> bool {
    if zone.is_excluded(pincode) || !zone.is_reachable() {
        return false;
    }
    CompiledZone::compile(zone.clone()).matches(pincode)
}

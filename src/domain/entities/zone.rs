//! # Shipping Zone Entity
//!
//! A named region of postal codes with inclusion and exclusion rules.
//!
//! # Examples
//!
//! ```
//! use shipping_resolver::domain::entities::ShippingZone;
//!
//! let zone = ShippingZone::new("zone-mumbai", "Mumbai Metro", 1)
//!     .with_range("400001-400099")
//!     .with_excluded("400050");
//!
//! assert!(zone.is_active());
//! assert!(zone.is_reachable());
//! assert!(zone.is_excluded("400050"));
//! ```

use crate::domain::value_objects::ZoneId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A shipping zone.
///
/// # Invariants
///
/// - A postal code in `excluded_pincodes` never matches, whatever the
///   patterns and ranges say
/// - A zone without patterns and ranges matches nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingZone {
    id: ZoneId,
    name: String,
    priority: i32,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    pincode_patterns: Vec<String>,
    #[serde(default)]
    pincode_ranges: Vec<String>,
    #[serde(default)]
    excluded_pincodes: BTreeSet<String>,
}

fn default_active() -> bool {
    true
}

impl ShippingZone {
    /// Creates an active zone with no matching rules.
    #[must_use]
    pub fn new(id: impl Into<ZoneId>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
            is_active: true,
            pincode_patterns: Vec::new(),
            pincode_ranges: Vec::new(),
            excluded_pincodes: BTreeSet::new(),
        }
    }

    /// Appends a regular-expression pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pincode_patterns.push(pattern.into());
        self
    }

    /// Appends a `"<low>-<high>"` range.
    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.pincode_ranges.push(range.into());
        self
    }

    /// Adds an excluded postal code.
    #[must_use]
    pub fn with_excluded(mut self, pincode: impl Into<String>) -> Self {
        self.excluded_pincodes.insert(pincode.into());
        self
    }

    /// Sets whether the zone takes part in resolution.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Returns the zone identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ZoneId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the priority; lower values are more specific.
    #[inline]
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns true if the zone takes part in resolution.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the inclusion patterns in configured order.
    #[inline]
    #[must_use]
    pub fn pincode_patterns(&self) -> &[String] {
        &self.pincode_patterns
    }

    /// Returns the inclusion ranges in configured order.
    #[inline]
    #[must_use]
    pub fn pincode_ranges(&self) -> &[String] {
        &self.pincode_ranges
    }

    /// Returns the excluded postal codes.
    #[inline]
    #[must_use]
    pub fn excluded_pincodes(&self) -> &BTreeSet<String> {
        &self.excluded_pincodes
    }

    /// Returns true if the postal code is explicitly excluded.
    #[must_use]
    pub fn is_excluded(&self, pincode: &str) -> bool {
        self.excluded_pincodes.contains(pincode)
    }

    /// Returns true if the zone has at least one inclusion rule.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        !self.pincode_patterns.is_empty() || !self.pincode_ranges.is_empty()
    }
}

impl fmt::Display for ShippingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone({} \"{}\" p{})", self.id, self.name, self.priority)
    }
}

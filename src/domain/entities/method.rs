//! # Shipping Method Entity
//!
//! A named service level with a default price and transit time.
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use shipping_resolver::domain::entities::ShippingMethod;
//!
//! let method = ShippingMethod::new("m-std", "Standard", "standard", Decimal::new(599, 2), 3);
//! assert_eq!(method.code(), "standard");
//! assert_eq!(method.estimated_days(), 3);
//! ```

use crate::domain::value_objects::MethodId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A shipping method.
///
/// Acts as the fallback pricing and ETA source when no rate applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    id: MethodId,
    name: String,
    code: String,
    base_rate: Decimal,
    estimated_days: u32,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ShippingMethod {
    /// Creates an active shipping method.
    #[must_use]
    pub fn new(
        id: impl Into<MethodId>,
        name: impl Into<String>,
        code: impl Into<String>,
        base_rate: Decimal,
        estimated_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            base_rate,
            estimated_days,
            is_active: true,
        }
    }

    /// Sets whether the method is offered.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Returns the method identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique slug.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the default price.
    #[inline]
    #[must_use]
    pub fn base_rate(&self) -> Decimal {
        self.base_rate
    }

    /// Returns the default transit time in business days.
    #[inline]
    #[must_use]
    pub fn estimated_days(&self) -> u32 {
        self.estimated_days
    }

    /// Returns true if the method is offered.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({} {} base={})", self.id, self.code, self.base_rate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_with_string_decimal() {
        let json = r#"{
            "id": "m-exp",
            "name": "Express",
            "code": "express",
            "baseRate": "12.50",
            "estimatedDays": 1,
            "isActive": false
        }"#;
        let method: ShippingMethod = serde_json::from_str(json).unwrap();
        assert_eq!(method.base_rate(), Decimal::new(1250, 2));
        assert!(!method.is_active());
    }

    #[test]
    fn with_active_toggles() {
        let method = ShippingMethod::new("m", "M", "m", Decimal::ONE, 0).with_active(false);
        assert!(!method.is_active());
    }
}

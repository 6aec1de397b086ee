//! # Resolution Context
//!
//! Per-request shipment attributes used to admit rates and anchor the ETA.
//!
//! The destination postal code travels alongside the context as an
//! explicit argument of each service operation.
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use shipping_resolver::domain::value_objects::{ResolutionContext, Timestamp};
//!
//! let ctx = ResolutionContext::new(Timestamp::now())
//!     .with_weight(Decimal::new(25, 1))
//!     .with_order_value(Decimal::new(4999, 2))
//!     .with_category("books")
//!     .with_customer_group("wholesale");
//!
//! assert!(ctx.validate().is_ok());
//! assert_eq!(ctx.product_categories().len(), 1);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shipment attributes for a single resolution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    weight: Option<Decimal>,
    order_value: Option<Decimal>,
    #[serde(default)]
    product_categories: BTreeSet<String>,
    customer_group: Option<String>,
    as_of: Timestamp,
}

impl ResolutionContext {
    /// Creates an empty context anchored at `as_of`.
    #[must_use]
    pub fn new(as_of: Timestamp) -> Self {
        Self {
            weight: None,
            order_value: None,
            product_categories: BTreeSet::new(),
            customer_group: None,
            as_of,
        }
    }

    /// Sets the shipment weight in kilograms.
    #[must_use]
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the order value.
    #[must_use]
    pub fn with_order_value(mut self, value: Decimal) -> Self {
        self.order_value = Some(value);
        self
    }

    /// Adds one product category present in the cart.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_categories.insert(category.into());
        self
    }

    /// Adds several product categories present in the cart.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_categories
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Sets the customer group.
    #[must_use]
    pub fn with_customer_group(mut self, group: impl Into<String>) -> Self {
        self.customer_group = Some(group.into());
        self
    }

    /// Returns the shipment weight, if known.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Option<Decimal> {
        self.weight
    }

    /// Returns the order value, if known.
    #[inline]
    #[must_use]
    pub fn order_value(&self) -> Option<Decimal> {
        self.order_value
    }

    /// Returns the product categories present in the cart.
    #[inline]
    #[must_use]
    pub fn product_categories(&self) -> &BTreeSet<String> {
        &self.product_categories
    }

    /// Returns the customer group, if any.
    #[inline]
    #[must_use]
    pub fn customer_group(&self) -> Option<&str> {
        self.customer_group.as_deref()
    }

    /// Returns the as-of timestamp.
    #[inline]
    #[must_use]
    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }

    /// Checks that numeric attributes are non-negative.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContext` for a negative weight or
    /// order value.
    pub fn validate(&self) -> DomainResult<()> {
        if self.weight.is_some_and(|w| w.is_sign_negative() && !w.is_zero()) {
            return Err(DomainError::invalid_context("weight must not be negative"));
        }
        if self
            .order_value
            .is_some_and(|v| v.is_sign_negative() && !v.is_zero())
        {
            return Err(DomainError::invalid_context(
                "order value must not be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn as_of() -> Timestamp {
        Timestamp::from_secs(1_792_108_800).unwrap()
    }

    #[test]
    fn defaults_are_empty() {
        let ctx = ResolutionContext::new(as_of());
        assert!(ctx.weight().is_none());
        assert!(ctx.order_value().is_none());
        assert!(ctx.product_categories().is_empty());
        assert!(ctx.customer_group().is_none());
        assert_eq!(ctx.as_of(), as_of());
    }

    #[test]
    fn categories_are_deduplicated() {
        let ctx = ResolutionContext::new(as_of()).with_categories(["toys", "books", "toys"]);
        assert_eq!(ctx.product_categories().len(), 2);
    }

    #[test]
    fn negative_weight_rejected() {
        let ctx = ResolutionContext::new(as_of()).with_weight(Decimal::new(-1, 0));
        assert!(matches!(
            ctx.validate(),
            Err(DomainError::InvalidContext(_))
        ));
    }

    #[test]
    fn negative_order_value_rejected() {
        let ctx = ResolutionContext::new(as_of()).with_order_value(Decimal::new(-500, 2));
        assert!(ctx.validate().is_err());
    }

    #[test]
    fn zero_values_accepted() {
        let ctx = ResolutionContext::new(as_of())
            .with_weight(Decimal::ZERO)
            .with_order_value(Decimal::ZERO);
        assert!(ctx.validate().is_ok());
    }
}

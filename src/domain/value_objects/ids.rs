//! # Identifiers
//!
//! Opaque string identifiers for shipping entities.
//!
//! Identifiers order lexicographically, which the resolver and rate
//! ranking rely on for deterministic tie-breaking.
//!
//! # Examples
//!
//! ```
//! use shipping_resolver::domain::value_objects::{RateId, ZoneId};
//!
//! let zone = ZoneId::new("zone-metro");
//! assert_eq!(zone.as_str(), "zone-metro");
//! assert!(RateId::new("rate-a") < RateId::new("rate-b"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`ShippingZone`](crate::domain::entities::ShippingZone).
    ZoneId
);

string_id!(
    /// Identifier of a [`ShippingMethod`](crate::domain::entities::ShippingMethod).
    MethodId
);

string_id!(
    /// Identifier of a [`ShippingRate`](crate::domain::entities::ShippingRate).
    RateId
);

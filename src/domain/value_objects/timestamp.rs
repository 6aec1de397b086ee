//! # Timestamp Value Object
//!
//! DateTime wrapper with the calendar projections the engine needs.
//!
//! Timestamps are stored in UTC. Weekday and wall-clock checks, as well
//! as ETA dates, are taken in the service's configured time reference,
//! expressed as a fixed UTC offset.
//!
//! # Examples
//!
//! ```
//! use chrono::FixedOffset;
//! use shipping_resolver::domain::value_objects::Timestamp;
//!
//! // 2026-10-16 20:00 UTC is already Saturday in UTC+05:30.
//! let ts = Timestamp::parse_rfc3339("2026-10-16T20:00:00Z").unwrap();
//! let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
//!
//! assert_eq!(ts.weekday_index(&FixedOffset::east_opt(0).unwrap()), 5);
//! assert_eq!(ts.weekday_index(&ist), 6);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Parses an RFC 3339 timestamp, normalising it to UTC.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContext` if the string is not RFC 3339.
    pub fn parse_rfc3339(raw: &str) -> DomainResult<Self> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| DomainError::invalid_context(format!("as-of timestamp {raw:?}: {e}")))
    }

    /// Returns this instant in the given time reference.
    #[must_use]
    pub fn in_offset(&self, offset: &FixedOffset) -> DateTime<FixedOffset> {
        self.0.with_timezone(offset)
    }

    /// Returns the calendar date in the given time reference.
    #[must_use]
    pub fn local_date(&self, offset: &FixedOffset) -> NaiveDate {
        self.in_offset(offset).date_naive()
    }

    /// Returns the wall-clock time in the given time reference.
    #[must_use]
    pub fn local_time(&self, offset: &FixedOffset) -> NaiveTime {
        self.in_offset(offset).time()
    }

    /// Returns the weekday in the given time reference, Sunday = 0.
    #[must_use]
    pub fn weekday_index(&self, offset: &FixedOffset) -> u8 {
        // num_days_from_sunday is always in 0..=6
        self.in_offset(offset).weekday().num_days_from_sunday() as u8
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

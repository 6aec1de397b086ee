//! # ETA Calculator
//!
//! Converts a transit-day figure into a calendar delivery date.
//!
//! Transit is counted in **business days**: Saturdays, Sundays and
//! holiday dates supplied by the deployment's [`HolidayCalendar`] are
//! skipped and never count toward the total. This mirrors how carriers
//! state their service levels.
//!
//! # Rules
//!
//! ```text
//! days == 0                     → as-of calendar date, unchanged
//! days  > 0                     → advance one business day at a time
//! as-of at/after dispatch cutoff → transit starts one business day later
//!   (business days only)
//! ```
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use shipping_resolver::domain::services::eta_calculator::EtaCalculator;
//! use shipping_resolver::domain::value_objects::Timestamp;
//!
//! let calculator = EtaCalculator::default();
//! // Friday
//! let as_of = Timestamp::parse_rfc3339("2026-10-16T10:00:00Z").unwrap();
//!
//! let eta = calculator.estimate(3, as_of).unwrap();
//! assert_eq!(eta.days, 3);
//! assert_eq!(eta.estimated_delivery_date, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::Timestamp;
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Calendar days scanned for a single business day before giving up.
pub const BUSINESS_DAY_SEARCH_HORIZON: u32 = 366;

/// Source of non-working dates.
pub trait HolidayCalendar: Send + Sync + fmt::Debug {
    /// Returns true if no deliveries happen on `date`.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A fixed set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticHolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl StaticHolidayCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar from a list of dates.
    #[must_use]
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Returns the number of holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the calendar has no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// A delivery estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimate {
    /// Transit time in business days, for "N business days" display.
    pub days: u32,
    /// Concrete date, for "Arrives by <date>" display.
    pub estimated_delivery_date: NaiveDate,
}

impl fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} business days, arrives by {}",
            self.days, self.estimated_delivery_date
        )
    }
}

/// Computes delivery dates from transit-day counts.
#[derive(Debug, Clone)]
pub struct EtaCalculator {
    calendar: Arc<dyn HolidayCalendar>,
    offset: FixedOffset,
    dispatch_cutoff: Option<NaiveTime>,
}

impl Default for EtaCalculator {
    fn default() -> Self {
        Self::new(Arc::new(StaticHolidayCalendar::new()), Utc.fix())
    }
}

impl EtaCalculator {
    /// Creates a calculator for a time reference and holiday calendar.
    #[must_use]
    pub fn new(calendar: Arc<dyn HolidayCalendar>, offset: FixedOffset) -> Self {
        Self {
            calendar,
            offset,
            dispatch_cutoff: None,
        }
    }

    /// Sets the daily dispatch cutoff.
    #[must_use]
    pub fn with_dispatch_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.dispatch_cutoff = Some(cutoff);
        self
    }

    /// Returns the time reference used for calendar dates.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> &FixedOffset {
        &self.offset
    }

    /// Returns true if deliveries happen on `date`.
    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.calendar.is_holiday(date)
    }

    /// Estimates the delivery date `days` business days after `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CalendarExhausted` if the holiday calendar
    /// leaves no business day within [`BUSINESS_DAY_SEARCH_HORIZON`]
    /// calendar days, or the date range overflows.
    pub fn estimate(&self, days: u32, as_of: Timestamp) -> DomainResult<DeliveryEstimate> {
        let start = as_of.local_date(&self.offset);
        if days == 0 {
            return Ok(DeliveryEstimate {
                days,
                estimated_delivery_date: start,
            });
        }

        // Orders placed on a non-business day all dispatch on the next one.
        let past_cutoff = self.is_business_day(start)
            && self
                .dispatch_cutoff
                .is_some_and(|cutoff| as_of.local_time(&self.offset) >= cutoff);
        let transit = if past_cutoff {
            days.saturating_add(1)
        } else {
            days
        };

        let mut date = start;
        for _ in 0..transit {
            date = self.next_business_day(date)?;
        }

        Ok(DeliveryEstimate {
            days,
            estimated_delivery_date: date,
        })
    }

    fn next_business_day(&self, from: NaiveDate) -> DomainResult<NaiveDate> {
        let mut date = from;
        for _ in 0..BUSINESS_DAY_SEARCH_HORIZON {
            date = date.succ_opt().ok_or_else(|| exhausted(from))?;
            if self.is_business_day(date) {
                return Ok(date);
            }
        }
        Err(exhausted(from))
    }
}

fn exhausted(from: NaiveDate) -> DomainError {
    DomainError::CalendarExhausted {
        from: from.to_string(),
        horizon_days: BUSINESS_DAY_SEARCH_HORIZON,
    }
}

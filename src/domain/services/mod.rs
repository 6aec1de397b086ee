//! # Domain Services
//!
//! Pure decision logic that does not belong to a single entity.
//!
//! ## Services
//!
//! - [`pincode_matcher`]: zone membership of a postal code
//! - [`rate_ranking`]: admission and ordering of candidate rates
//! - [`eta_calculator`]: business-day delivery dates
//! - [`catalog_validation`]: write-side checks for catalog records

pub mod catalog_validation;
pub mod eta_calculator;
pub mod pincode_matcher;
pub mod rate_ranking;

pub use catalog_validation::{ValidationIssue, validate_catalog};
pub use eta_calculator::{DeliveryEstimate, EtaCalculator, HolidayCalendar, StaticHolidayCalendar};
pub use pincode_matcher::{CompiledZone, PincodeRange};
pub use rate_ranking::{RankedRate, RateRankingStrategy, ZonePriorityFirst, rank_rates};

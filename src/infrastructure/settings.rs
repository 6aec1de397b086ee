//! # Engine Settings
//!
//! Deployment configuration for the resolution engine.
//!
//! Sources are layered, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. Environment variables prefixed with `SHIPPING_`
//!    (a `.env` file in the working directory is loaded first)
//!
//! ```text
//! SHIPPING_REPOSITORY_TIMEOUT_MS=1500
//! SHIPPING_UTC_OFFSET_MINUTES=330
//! SHIPPING_DISPATCH_CUTOFF=17:00
//! SHIPPING_HOLIDAYS=2026-01-26,2026-08-15
//! SHIPPING_MAX_PINCODE_LENGTH=6
//! ```

use crate::application::services::ResolutionConfig;
use crate::domain::services::StaticHolidayCalendar;
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const ENV_PREFIX: &str = "SHIPPING";

/// Error type for loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Source(#[from] ConfigError),

    /// The UTC offset is outside ±24 hours.
    #[error("utc_offset_minutes out of range: {0}")]
    InvalidOffset(i32),

    /// The dispatch cutoff is not an `HH:MM` time.
    #[error("dispatch_cutoff must be HH:MM, got {0:?}")]
    InvalidCutoff(String),

    /// A numeric setting must be positive.
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

/// Result type for settings.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Engine settings as read from configuration sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Upper bound on every repository read, in milliseconds.
    pub repository_timeout_ms: u64,
    /// Offset of the service time reference from UTC, in minutes.
    pub utc_offset_minutes: i32,
    /// Daily dispatch cutoff as `HH:MM`.
    pub dispatch_cutoff: Option<String>,
    /// Dates on which no deliveries happen.
    pub holidays: Vec<NaiveDate>,
    /// Longest postal code accepted.
    pub max_pincode_length: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            repository_timeout_ms: 2000,
            utc_offset_minutes: 0,
            dispatch_cutoff: None,
            holidays: Vec::new(),
            max_pincode_length: 10,
        }
    }
}

impl EngineSettings {
    /// Loads settings from defaults, an optional TOML file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Source` if the file exists but cannot be
    /// parsed, or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "loaded .env file");
        }

        let mut builder = defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("holidays"),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Parses settings from a TOML document layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Source` if the document does not parse.
    pub fn from_toml_str(toml: &str) -> SettingsResult<Self> {
        let settings: Self = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Returns the service time reference.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidOffset` if the offset is out of range.
    pub fn offset(&self) -> SettingsResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(SettingsError::InvalidOffset(self.utc_offset_minutes))
    }

    /// Returns the parsed dispatch cutoff.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidCutoff` if it is not `HH:MM`.
    pub fn dispatch_cutoff(&self) -> SettingsResult<Option<NaiveTime>> {
        self.dispatch_cutoff
            .as_deref()
            .map(|raw| {
                NaiveTime::parse_from_str(raw.trim(), "%H:%M")
                    .map_err(|_| SettingsError::InvalidCutoff(raw.to_string()))
            })
            .transpose()
    }

    /// Returns the configured holidays as a calendar.
    #[must_use]
    pub fn holiday_calendar(&self) -> StaticHolidayCalendar {
        StaticHolidayCalendar::from_dates(self.holidays.iter().copied())
    }

    /// Converts the settings into a service configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset or cutoff is invalid.
    pub fn resolution_config(&self) -> SettingsResult<ResolutionConfig> {
        let mut config = ResolutionConfig::with_timeout(self.repository_timeout_ms)
            .with_offset(self.offset()?)
            .with_max_pincode_length(self.max_pincode_length);
        if let Some(cutoff) = self.dispatch_cutoff()? {
            config = config.with_dispatch_cutoff(cutoff);
        }
        Ok(config)
    }

    fn check(&self) -> SettingsResult<()> {
        if self.repository_timeout_ms == 0 {
            return Err(SettingsError::NotPositive("repository_timeout_ms"));
        }
        if self.max_pincode_length == 0 {
            return Err(SettingsError::NotPositive("max_pincode_length"));
        }
        self.offset()?;
        self.dispatch_cutoff()?;
        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = EngineSettings::default();
    Config::builder()
        .set_default(
            "repository_timeout_ms",
            i64::try_from(defaults.repository_timeout_ms).unwrap_or(i64::MAX),
        )?
        .set_default("utc_offset_minutes", i64::from(defaults.utc_offset_minutes))?
        .set_default(
            "max_pincode_length",
            i64::try_from(defaults.max_pincode_length).unwrap_or(i64::MAX),
        )?
        .set_default("holidays", Vec::<String>::new())
}

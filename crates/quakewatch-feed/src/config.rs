//! Feed configuration loaded from environment variables.
//!
//! The pipeline needs to know where the event service lives, how many
//! results to request, the minimum magnitude of interest, and how long a
//! fetch may take. Preference storage and user-facing settings screens are
//! external collaborators; this module only supplies their defaults.

use std::time::Duration;

/// Default base endpoint of the USGS FDSN event service.
pub const DEFAULT_FEED_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Default maximum number of events requested per cycle.
pub const DEFAULT_LIMIT: u32 = 10;

/// Default minimum magnitude requested from the service.
pub const DEFAULT_MIN_MAGNITUDE: f64 = 6.0;

/// Default fetch deadline in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// The offending environment variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Complete feed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Base endpoint of the event service, without query parameters.
    pub base_url: String,
    /// Maximum number of events to request per cycle.
    pub limit: u32,
    /// Minimum magnitude to request from the service.
    pub min_magnitude: f64,
    /// Deadline for a single fetch (connect through body read).
    pub fetch_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_owned(),
            limit: DEFAULT_LIMIT,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional and falls back to its documented default:
    ///
    /// - `QUAKEWATCH_FEED_URL` -- base endpoint of the event service
    /// - `QUAKEWATCH_LIMIT` -- maximum events per cycle (default 10)
    /// - `QUAKEWATCH_MIN_MAGNITUDE` -- minimum magnitude (default 6.0)
    /// - `QUAKEWATCH_FETCH_TIMEOUT_MS` -- fetch deadline (default 10000)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but does not
    /// parse as the expected type.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("QUAKEWATCH_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_owned());

        let limit: u32 = parse_env("QUAKEWATCH_LIMIT", DEFAULT_LIMIT)?;
        let min_magnitude: f64 = parse_env("QUAKEWATCH_MIN_MAGNITUDE", DEFAULT_MIN_MAGNITUDE)?;
        let timeout_ms: u64 = parse_env("QUAKEWATCH_FETCH_TIMEOUT_MS", DEFAULT_FETCH_TIMEOUT_MS)?;

        Ok(Self {
            base_url,
            limit,
            min_magnitude,
            fetch_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// Read an optional environment variable, parsing it into `T` when set.
fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

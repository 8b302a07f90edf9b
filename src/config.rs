use std::env;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::SlotFinderError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.playtomic.io/v1";
pub const DEFAULT_LINK_BASE_URL: &str = "https://app.playtomic.com";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Settings for one slot-finder instance. Built once and handed to [`crate::SlotFinder::new`].
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub link_base_url: String,
    pub geocoding_url: String,
    /// Zone used by the tool and CLI layers when the caller names none.
    pub default_timezone: Tz,
    /// ISO 3166-1 alpha-2 code narrowing geocoder results.
    pub default_country: Option<String>,
    pub default_radius_km: u32,
    pub request_timeout: Duration,
    /// Upper bound on slots surfaced in one structured tool response.
    pub max_tool_slots: usize,
    pub max_tool_venues: usize,
    pub max_name_search_attempts: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            link_base_url: DEFAULT_LINK_BASE_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            default_timezone: chrono_tz::Europe::Berlin,
            default_country: None,
            default_radius_km: 50,
            request_timeout: Duration::from_secs(10),
            max_tool_slots: 10,
            max_tool_venues: 5,
            max_name_search_attempts: 4,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, SlotFinderError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SlotFinderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get("BOOKING_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get("BOOKING_LINK_BASE_URL") {
            config.link_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get("GEOCODING_URL") {
            config.geocoding_url = url;
        }
        if let Some(tz) = get("DEFAULT_TIMEZONE") {
            config.default_timezone = tz.parse::<Tz>().map_err(|_| {
                SlotFinderError::validation(format!("Unknown timezone: {}", tz), "DEFAULT_TIMEZONE")
            })?;
        }
        config.default_country = get("DEFAULT_COUNTRY").map(|c| c.to_lowercase());
        if let Some(radius) = get("DEFAULT_RADIUS_KM") {
            config.default_radius_km = parse_number(&radius, "DEFAULT_RADIUS_KM")?;
        }
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number(&secs, "REQUEST_TIMEOUT_SECS")?);
        }
        if let Some(max) = get("MAX_TOOL_SLOTS") {
            config.max_tool_slots = parse_number(&max, "MAX_TOOL_SLOTS")?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level;
        }
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Self {
        self.geocoding_url = url.into();
        self
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, SlotFinderError> {
    raw.parse::<T>()
        .map_err(|_| SlotFinderError::validation(format!("{} must be a number, got '{}'", key, raw), key))
}

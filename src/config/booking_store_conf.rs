use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Connection settings for the remote booking store API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStoreConfig {
    /// Base URL of the booking API, without a trailing slash
    pub api_url: String,
    /// Shared secret sent in the `x-api-key` header
    pub api_key: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl BookingStoreConfig {
    /// Load booking store configuration from environment variables
    ///
    /// Expected environment variables:
    /// - BOOKING_API_URL: Base URL (e.g., "https://example.com/wp-json/villa-claudia/v1")
    /// - BOOKING_API_KEY: API key accepted by the booking store
    /// - BOOKING_API_TIMEOUT: Request timeout in seconds (defaults to 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading booking store configuration from environment variables");

        let api_url = env::var("BOOKING_API_URL")
            .map_err(|_| {
                error!("BOOKING_API_URL environment variable not found");
                ConfigError::EnvVarNotFound("BOOKING_API_URL".to_string())
            })?;
        let api_url = api_url.trim_end_matches('/').to_string();
        debug!("Booking API URL: {}", api_url);

        let api_key = env::var("BOOKING_API_KEY")
            .map_err(|_| {
                error!("BOOKING_API_KEY environment variable not found");
                ConfigError::EnvVarNotFound("BOOKING_API_KEY".to_string())
            })?;
        debug!("Booking API key loaded (length: {} chars)", api_key.len());

        let timeout_secs = env::var("BOOKING_API_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("BOOKING_API_TIMEOUT not set, defaulting to 30 seconds");
                "30".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid BOOKING_API_TIMEOUT value");
                ConfigError::InvalidValue("Invalid BOOKING_API_TIMEOUT value".to_string())
            })?;
        debug!("Booking API timeout: {} seconds", timeout_secs);

        let config = Self {
            api_url,
            api_key,
            timeout_secs,
        };

        config.validate()?;
        info!("Booking store configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            error!("Booking API URL is empty");
            return Err(ConfigError::ValidationError("Booking API URL cannot be empty".to_string()));
        }

        if reqwest::Url::parse(&self.api_url).is_err() {
            error!("Booking API URL is not a valid URL: {}", self.api_url);
            return Err(ConfigError::ValidationError(format!(
                "Booking API URL is not a valid URL: {}",
                self.api_url
            )));
        }

        if self.api_key.is_empty() {
            error!("Booking API key is empty");
            return Err(ConfigError::ValidationError("Booking API key cannot be empty".to_string()));
        }

        if self.timeout_secs == 0 {
            error!("Booking API timeout is 0");
            return Err(ConfigError::ValidationError("Booking API timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    /// URL of an endpoint below the API base. Each segment is appended and
    /// percent-encoded on its own, so a segment can never add path levels.
    pub fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ConfigError> {
        let mut url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidValue(format!("Booking API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidValue("Booking API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

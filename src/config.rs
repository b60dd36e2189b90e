//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI base URL
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache entry lifetime and reaper period
    pub cache_interval: Duration,
    /// Base URL every endpoint is resolved against
    pub api_base_url: String,
    /// Per-request timeout for outbound HTTP calls
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_MS` - Cache interval in milliseconds (default: 5000)
    /// - `POKEDEX_API_BASE_URL` - API base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_interval),
            api_base_url: env::var("POKEDEX_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(5),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

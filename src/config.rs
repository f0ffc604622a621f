use crate::correlation::Thresholds;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Alert threshold configuration
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Upstream feed configuration
    #[serde(default)]
    pub feeds: FeedConfig,

    /// Notification configuration
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, an optional config
    /// file, and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("DETWATCH_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: DETWATCH)
            .add_source(
                config::Environment::with_prefix("DETWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            feeds: FeedConfig::default(),
            notifications: NotificationConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// USGS FDSN event query endpoint
    #[serde(default = "default_usgs_url")]
    pub usgs_url: String,

    /// Safecast measurements endpoint
    #[serde(default = "default_safecast_url")]
    pub safecast_url: String,

    /// Request timeout for feed queries (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            usgs_url: default_usgs_url(),
            safecast_url: default_safecast_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Enable webhook notifications
    #[serde(default)]
    pub webhook_enabled: bool,

    /// Name of the environment variable holding the webhook URL
    #[serde(default = "default_webhook_url_env")]
    pub webhook_url_env: String,

    /// Webhook timeout (seconds)
    #[serde(default = "default_webhook_timeout")]
    pub webhook_timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_enabled: false,
            webhook_url_env: default_webhook_url_env(),
            webhook_timeout_secs: default_webhook_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_usgs_url() -> String {
    "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string()
}

fn default_safecast_url() -> String {
    "https://api.safecast.org/measurements.json".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_webhook_url_env() -> String {
    "DETWATCH_WEBHOOK_URL".to_string()
}

fn default_webhook_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.feeds.request_timeout_secs, 10);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.notifications.webhook_enabled);
        assert_eq!(config.notifications.webhook_url_env, "DETWATCH_WEBHOOK_URL");
    }

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.thresholds.min_magnitude, 1.0);
        assert_eq!(config.thresholds.max_depth_km, 2.0);
        assert_eq!(config.thresholds.radiation_threshold_cpm, 125.0);
        assert_eq!(config.thresholds.search_radius_km, 20.0);
        assert_eq!(config.thresholds.lookback_minutes, 15.0);
    }

    #[test]
    fn test_embedded_toml_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let defaults = Config::default();
        assert_eq!(parsed.thresholds.min_magnitude, defaults.thresholds.min_magnitude);
        assert_eq!(parsed.thresholds.radiation_threshold_cpm, defaults.thresholds.radiation_threshold_cpm);
        assert_eq!(parsed.feeds.usgs_url, defaults.feeds.usgs_url);
        assert_eq!(parsed.feeds.safecast_url, defaults.feeds.safecast_url);
    }
}

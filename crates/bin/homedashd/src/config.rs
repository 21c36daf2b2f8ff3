//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory (or the file named by
//! `HOMEDASH_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use homedash_adapter_http_reqwest::HttpConfig;
use homedash_app::services::dashboard_client::{DEFAULT_METRICS_LIMIT, DashboardConfig};
use homedash_domain::device::{DEFAULT_DEVICE_ID, DeviceId};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend proxy settings.
    pub api: ApiConfig,
    /// Polling and device settings.
    pub dashboard: DashboardSection,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Backend proxy configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin the `/api/*` paths are appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Dashboard session configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Device every request is scoped to.
    pub device_id: String,
    /// Telemetry polling period in milliseconds.
    pub telemetry_interval_ms: u64,
    /// Metrics polling period in milliseconds.
    pub metrics_interval_ms: u64,
    /// Page size of the metrics listing.
    pub metrics_limit: u32,
    /// Pull the backend's control state on start.
    pub sync_controls: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("HOMEDASH_CONFIG").unwrap_or_else(|_| "homedash.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOMEDASH_API_BASE") {
            self.api.base_url = val;
        }
        if let Some(val) = var("HOMEDASH_DEVICE") {
            self.dashboard.device_id = val;
        }
        if let Some(secs) = var("HOMEDASH_TIMEOUT_SECS").and_then(|val| val.parse().ok()) {
            self.api.timeout_secs = Some(secs);
        }
        if let Some(val) = var("HOMEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.dashboard.telemetry_interval_ms == 0 || self.dashboard.metrics_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "polling intervals must be non-zero".to_string(),
            ));
        }
        if self.dashboard.metrics_limit == 0 {
            return Err(ConfigError::Validation(
                "metrics_limit must be non-zero".to_string(),
            ));
        }
        DeviceId::new(self.dashboard.device_id.as_str())
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(())
    }

    /// Settings for the HTTP transport.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.api.base_url.clone(),
            timeout_secs: self.api.timeout_secs,
        }
    }

    /// Settings for the dashboard session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the device id is blank.
    pub fn dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        let device_id = DeviceId::new(self.dashboard.device_id.as_str())
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(DashboardConfig {
            device_id,
            telemetry_interval: Duration::from_millis(self.dashboard.telemetry_interval_ms),
            metrics_interval: Duration::from_millis(self.dashboard.metrics_interval_ms),
            metrics_limit: self.dashboard.metrics_limit,
            sync_controls: self.dashboard.sync_controls,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: Some(10),
        }
    }
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID.to_string(),
            telemetry_interval_ms: 4000,
            metrics_interval_ms: 10_000,
            metrics_limit: DEFAULT_METRICS_LIMIT,
            sync_controls: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedashd=info,homedash_app=info,homedash_adapter_http_reqwest=warn"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

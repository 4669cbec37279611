//! Configuration management for the `Statewatch` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::StatewatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `Statewatch` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatewatchConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Air-quality provider (AirNow) settings
    pub air_now: AirNowConfig,
    /// Weather provider (Open-Meteo) settings
    pub weather: WeatherConfig,
    /// Image-search provider (Pexels) settings
    pub photos: PhotoConfig,
    /// Multi-state overview settings
    pub overview: OverviewConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built frontend, served as fallback when present
    pub static_dir: Option<String>,
    /// PEM certificate path; TLS is enabled when both cert and key are set
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

/// Air-quality provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirNowConfig {
    pub base_url: String,
    /// Explicit key; when absent the key is read from `api_key_env` per call
    pub api_key: Option<String>,
    pub api_key_env: String,
    /// Hard deadline for the observation call
    pub timeout_seconds: u32,
    /// Search radius around the representative postal code, in miles
    pub search_radius_miles: u32,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
}

/// Image-search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    /// Number of results requested per search
    pub per_page: u32,
    /// Number of photos returned to the caller
    pub max_photos: usize,
    pub placeholder_base_url: String,
    /// State name -> curated photo set returned instead of searching
    pub overrides: HashMap<String, Vec<String>>,
}

/// Multi-state overview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    pub states: Vec<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_air_now_base_url() -> String {
    "https://www.airnowapi.org".to_string()
}

fn default_air_now_key_env() -> String {
    "AIRNOW_API_KEY".to_string()
}

fn default_air_now_timeout() -> u32 {
    20
}

fn default_search_radius() -> u32 {
    100
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_photo_base_url() -> String {
    "https://api.pexels.com/v1".to_string()
}

fn default_photo_key_env() -> String {
    "PEXELS_API_KEY".to_string()
}

fn default_per_page() -> u32 {
    15
}

fn default_max_photos() -> usize {
    3
}

fn default_placeholder_base_url() -> String {
    "https://picsum.photos".to_string()
}

fn default_overview_states() -> Vec<String> {
    ["CA", "NY", "TX", "FL", "IL"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for AirNowConfig {
    fn default() -> Self {
        Self {
            base_url: default_air_now_base_url(),
            api_key: None,
            api_key_env: default_air_now_key_env(),
            timeout_seconds: default_air_now_timeout(),
            search_radius_miles: default_search_radius(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            base_url: default_photo_base_url(),
            api_key: None,
            api_key_env: default_photo_key_env(),
            per_page: default_per_page(),
            max_photos: default_max_photos(),
            placeholder_base_url: default_placeholder_base_url(),
            overrides: HashMap::new(),
        }
    }
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            states: default_overview_states(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AirNowConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl StatewatchConfig {
    /// Load configuration from `config_path` (or `config/default.toml`) and
    /// `STATEWATCH_*` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config/default.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // STATEWATCH_AIR_NOW__API_KEY -> air_now.api_key
        builder = builder.add_source(
            Environment::with_prefix("STATEWATCH")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("overview.states")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: StatewatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.air_now.base_url.is_empty() {
            self.air_now.base_url = default_air_now_base_url();
        }
        if self.air_now.api_key_env.is_empty() {
            self.air_now.api_key_env = default_air_now_key_env();
        }
        if self.air_now.timeout_seconds == 0 {
            self.air_now.timeout_seconds = default_air_now_timeout();
        }
        if self.air_now.search_radius_miles == 0 {
            self.air_now.search_radius_miles = default_search_radius();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.photos.base_url.is_empty() {
            self.photos.base_url = default_photo_base_url();
        }
        if self.photos.api_key_env.is_empty() {
            self.photos.api_key_env = default_photo_key_env();
        }
        if self.photos.per_page == 0 {
            self.photos.per_page = default_per_page();
        }
        if self.photos.max_photos == 0 {
            self.photos.max_photos = default_max_photos();
        }
        if self.photos.placeholder_base_url.is_empty() {
            self.photos.placeholder_base_url = default_placeholder_base_url();
        }
        if self.overview.states.is_empty() {
            self.overview.states = default_overview_states();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Explicit keys may be omitted, but never blank
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.air_now.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err(StatewatchError::config(
                "AirNow API key cannot be empty if provided. Either remove it or provide a valid key.",
            )
            .into());
        }

        if self.photos.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err(StatewatchError::config(
                "Pexels API key cannot be empty if provided. Either remove it or provide a valid key.",
            )
            .into());
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.air_now.timeout_seconds > 300 {
            return Err(
                StatewatchError::config("AirNow timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.air_now.search_radius_miles > 500 {
            return Err(
                StatewatchError::config("AirNow search radius cannot exceed 500 miles").into(),
            );
        }

        if self.photos.per_page > 80 {
            return Err(StatewatchError::config("Photo page size cannot exceed 80").into());
        }

        if self.photos.max_photos > self.photos.per_page as usize {
            return Err(StatewatchError::config(
                "Maximum photos cannot exceed the photo page size",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(StatewatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(StatewatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("AirNow", &self.air_now.base_url),
            ("Weather", &self.weather.base_url),
            ("Photo", &self.photos.base_url),
            ("Placeholder", &self.photos.placeholder_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StatewatchError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(StatewatchError::config(
                "TLS requires both tls_cert_path and tls_key_path",
            )
            .into());
        }

        Ok(())
    }
}

/// Resolves a provider key: the configured value wins, otherwise the
/// environment variable is read at call time.
pub fn resolve_api_key(
    configured: Option<&str>,
    env_var: &str,
    provider: &str,
) -> crate::Result<String> {
    if let Some(key) = configured.filter(|k| !k.trim().is_empty()) {
        return Ok(key.to_string());
    }

    std::env::var(env_var)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            tracing::error!("{} not found", env_var);
            StatewatchError::config(format!("{provider} API key not configured"))
        })
}

//! Configuration management for the travel planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding the aviationstack access key
pub const AVIATION_STACK_KEY_VAR: &str = "AVIATION_STACK_API_KEY";
/// Environment variable holding the weatherstack access key
pub const WEATHER_STACK_KEY_VAR: &str = "WEATHER_STACK_API_KEY";

/// Access key that never shows up in `Debug` output or logs
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TravelPlannerConfig {
    /// Flight schedule API configuration
    pub flights: ServiceConfig,
    /// Weather API configuration
    pub weather: ServiceConfig,
    /// Fetch cycle settings
    pub fetch: FetchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Reference dataset location
    pub reference: ReferenceConfig,
}

/// Settings shared by both remote collaborators
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Access key, also read from the service's well-known env var
    pub api_key: Option<ApiKey>,
    /// Base URL, empty means the service default
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound for each lookup inside a fetch cycle, in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Replacement countries file; the embedded table is used when unset
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_flights_base_url() -> String {
    "https://api.aviationstack.com/v1".to_string()
}

fn default_weather_base_url() -> String {
    "http://api.weatherstack.com".to_string()
}

fn default_service_timeout() -> u32 {
    10
}

fn default_fetch_timeout() -> u32 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl TravelPlannerConfig {
    /// Configuration with every default applied and no keys
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut config = Self::default();
        config.apply_defaults();
        config
    }

    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. TRAVEL_PLANNER_FETCH__TIMEOUT_SECONDS=20
        builder = builder.add_source(
            Environment::with_prefix("TRAVEL_PLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_keys();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travel-planner").join("config.toml"))
    }

    /// Fill missing keys from `AVIATION_STACK_API_KEY` / `WEATHER_STACK_API_KEY`
    pub fn apply_env_keys(&mut self) {
        if self.flights.api_key.is_none() {
            self.flights.api_key = std::env::var(AVIATION_STACK_KEY_VAR).ok().map(ApiKey::new);
        }
        if self.weather.api_key.is_none() {
            self.weather.api_key = std::env::var(WEATHER_STACK_KEY_VAR).ok().map(ApiKey::new);
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.flights.base_url.is_empty() {
            self.flights.base_url = default_flights_base_url();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.flights.timeout_seconds == 0 {
            self.flights.timeout_seconds = default_service_timeout();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_service_timeout();
        }
        if self.fetch.timeout_seconds == 0 {
            self.fetch.timeout_seconds = default_fetch_timeout();
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
        validate_service("flights", &self.flights)?;
        validate_service("weather", &self.weather)?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Both keys are required before any lookup can run
    pub fn require_api_keys(&self) -> Result<(ApiKey, ApiKey)> {
        let flights = self.flights.api_key.clone().ok_or_else(|| {
            TravelPlannerError::config(format!(
                "Flight schedule API key missing. Set {AVIATION_STACK_KEY_VAR} or flights.api_key."
            ))
        })?;
        let weather = self.weather.api_key.clone().ok_or_else(|| {
            TravelPlannerError::config(format!(
                "Weather API key missing. Set {WEATHER_STACK_KEY_VAR} or weather.api_key."
            ))
        })?;
        Ok((flights, weather))
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.fetch.timeout_seconds > 300 {
            return Err(TravelPlannerError::config("Fetch timeout cannot exceed 300 seconds").into());
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelPlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelPlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

fn validate_service(name: &str, service: &ServiceConfig) -> Result<()> {
    if let Some(api_key) = &service.api_key {
        if api_key.expose().trim().is_empty() {
            return Err(TravelPlannerError::config(format!(
                "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
            ))
            .into());
        }

        if api_key.expose().len() > 100 {
            return Err(TravelPlannerError::config(format!(
                "{name} API key appears to be invalid (too long). Please check your API key."
            ))
            .into());
        }
    }

    if service.timeout_seconds > 300 {
        return Err(
            TravelPlannerError::config(format!("{name} timeout cannot exceed 300 seconds")).into(),
        );
    }

    if !service.base_url.starts_with("http://") && !service.base_url.starts_with("https://") {
        return Err(TravelPlannerError::config(format!(
            "{name} base URL must be a valid HTTP or HTTPS URL"
        ))
        .into());
    }

    Ok(())
}

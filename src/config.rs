//! Configuration management for the `TripWeaver` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. Service
//! credentials are carried here and handed to the clients at construction
//! time; there is no ambient global key state.

use crate::TripWeaverError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripWeaver` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripWeaverConfig {
    /// Primary geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Places-search and static-imagery service configuration
    #[serde(default)]
    pub places: PlacesConfig,
    /// Itinerary-generation (language model) configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Batch resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Primary geocoding service settings (Nominatim, no API key required)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the Nominatim search API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// User agent sent with geocoding requests (Nominatim requires one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Places-search service settings (Google Places + Static Maps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// API key; without it the fallback geocoder and imagery are disabled
    pub api_key: Option<String>,
    /// Base URL for the places API
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Base URL for the static map API
    #[serde(default = "default_static_map_base_url")]
    pub static_map_base_url: String,
    /// Static map zoom level
    #[serde(default = "default_map_zoom")]
    pub map_zoom: u32,
    /// Static map size, e.g. "400x400"
    #[serde(default = "default_map_size")]
    pub map_size: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Itinerary-generation settings for an OpenAI-compatible chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key for the generation service
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_generation_temperature")]
    pub temperature: f32,
    /// Response token budget
    #[serde(default = "default_generation_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u32,
}

/// Batch resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum in-flight place resolutions
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "TripWeaver/0.1.0".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_static_map_base_url() -> String {
    "https://maps.googleapis.com/maps/api/staticmap".to_string()
}

fn default_map_zoom() -> u32 {
    17
}

fn default_map_size() -> String {
    "400x400".to_string()
}

fn default_generation_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generation_temperature() -> f32 {
    1.0
}

fn default_generation_max_tokens() -> u32 {
    1024
}

fn default_generation_timeout() -> u32 {
    60
}

fn default_timeout() -> u32 {
    10
}

fn default_concurrency() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            static_map_base_url: default_static_map_base_url(),
            map_zoom: default_map_zoom(),
            map_size: default_map_size(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            temperature: default_generation_temperature(),
            max_tokens: default_generation_max_tokens(),
            timeout_seconds: default_generation_timeout(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TripWeaverConfig {
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

        // Environment variable overrides with TRIPWEAVER_ prefix,
        // e.g. TRIPWEAVER_PLACES__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("TRIPWEAVER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TripWeaverConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripweaver").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        for (name, key) in [
            ("Places", &self.places.api_key),
            ("Generation", &self.generation.api_key),
        ] {
            if let Some(api_key) = key {
                if api_key.is_empty() {
                    return Err(TripWeaverError::config(format!(
                        "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }

                if api_key.len() < 8 {
                    return Err(TripWeaverError::config(format!(
                        "{name} API key appears to be invalid (too short). Please check your API key."
                    ))
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        for (name, timeout) in [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Places", self.places.timeout_seconds),
            ("Generation", self.generation.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(TripWeaverError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds"
                ))
                .into());
            }
        }

        if self.resolver.concurrency == 0 || self.resolver.concurrency > 16 {
            return Err(TripWeaverError::config(
                "Resolver concurrency must be between 1 and 16",
            )
            .into());
        }

        if self.places.map_zoom > 21 {
            return Err(TripWeaverError::config("Static map zoom cannot exceed 21").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripWeaverError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Places", &self.places.base_url),
            ("Static map", &self.places.static_map_base_url),
            ("Generation", &self.generation.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripWeaverError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

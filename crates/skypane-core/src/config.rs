use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable consulted when `weather.api_key` is unset
pub const WEATHER_API_KEY_ENV: &str = "SKYPANE_WEATHER_API_KEY";
/// Environment variable consulted when `geocoding.api_key` is unset
pub const GEOCODING_API_KEY_ENV: &str = "SKYPANE_GEOCODING_API_KEY";

/// One problem found in a config, keyed by its dotted field path
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors block startup; warnings are only logged
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(field, message));
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(field, message));
    }

    /// All errors on one line, `;`-separated
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Everything read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `config.toml`; set from the loaded path, never read from the file
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// Forecast provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// City search settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Fixed position used at startup
    #[serde(default)]
    pub location: LocationConfig,

    /// Panel layout
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Visual Crossing timeline endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key (falls back to `SKYPANE_WEATHER_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// OpenWeatherMap geocoding endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// API key (falls back to `SKYPANE_GEOCODING_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Number of candidates requested per search
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_base_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

fn default_result_limit() -> u32 {
    1
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
            result_limit: default_result_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// Both coordinates, if configured
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of weekday cards in the panel
    #[serde(default = "default_weekday_cards")]
    pub weekday_cards: usize,
}

fn default_weekday_cards() -> usize {
    6
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            weekday_cards: default_weekday_cards(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skypane");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            geocoding: GeocodingConfig::default(),
            location: LocationConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Read `config.toml` from the platform config directory.
    ///
    /// # Errors
    /// Unreadable or malformed files.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Read `config_path`, writing a default file first if none exists.
    ///
    /// # Errors
    /// Unreadable or malformed files, or a default that cannot be written.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str::<Config>(&contents)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            tracing::info!("Writing default config to {}", config_path.display());
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        if let Some(dir) = config_path.parent() {
            config.config_dir = dir.to_path_buf();
        }
        config.apply_env_overrides();
        Ok(config)
    }

    /// [`Config::load`] followed by [`Config::validate`]; warnings are logged.
    ///
    /// # Errors
    /// Load failures, or any validation error.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!("Invalid configuration: {}", validation.error_summary());
        }
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Fill unset API keys from the environment
    fn apply_env_overrides(&mut self) {
        if self.weather.api_key.is_none() {
            self.weather.api_key = std::env::var(WEATHER_API_KEY_ENV).ok();
        }
        if self.geocoding.api_key.is_none() {
            self.geocoding.api_key = std::env::var(GEOCODING_API_KEY_ENV).ok();
        }
    }

    /// Check URLs, timeouts, coordinates and keys. Missing keys and a
    /// missing position are warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_url(&self.geocoding.base_url, "geocoding.base_url", &mut result);

        if self.weather.api_key.as_deref().map_or(true, str::is_empty) {
            result.add_warning(
                "weather.api_key",
                format!("No weather API key configured (set {WEATHER_API_KEY_ENV})"),
            );
        }
        if self.geocoding.api_key.as_deref().map_or(true, str::is_empty) {
            result.add_warning(
                "geocoding.api_key",
                format!("No geocoding API key configured (set {GEOCODING_API_KEY_ENV})"),
            );
        }

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }
        if self.geocoding.timeout_secs == 0 {
            result.add_error("geocoding.timeout_secs", "Timeout must be greater than 0");
        }
        if self.geocoding.result_limit == 0 {
            result.add_error("geocoding.result_limit", "Result limit must be at least 1");
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("location.latitude", "Latitude must be within -90..=90");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error("location.longitude", "Longitude must be within -180..=180");
                }
            }
            (None, None) => {
                result.add_warning(
                    "location",
                    "No startup position configured - only city search is available",
                );
            }
            _ => {
                result.add_error(
                    "location",
                    "Latitude and longitude must be set together",
                );
            }
        }

        if self.ui.weekday_cards == 0 {
            result.add_warning("ui.weekday_cards", "Weekday forecast hidden (0 cards)");
        } else if self.ui.weekday_cards > 14 {
            result.add_warning(
                "ui.weekday_cards",
                "More weekday cards than most providers return days for",
            );
        }

        result
    }

    fn validate_url(&self, raw: &str, field: &str, result: &mut ValidationResult) {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                result.add_error(field, format!("Invalid URL: {e}"));
                return;
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            result.add_error(
                field,
                format!("URL must use http or https, got {}", url.scheme()),
            );
        }
        if url.host().is_none() {
            result.add_error(field, "URL has no host");
        }
        if url.port() == Some(0) {
            result.add_error(field, "Port 0 is not allowed");
        }
    }

    /// # Errors
    /// When the config directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// # Errors
    /// When the parent directory or file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("No platform config directory")?;
        Ok(base.join("skypane").join("config.toml"))
    }
}

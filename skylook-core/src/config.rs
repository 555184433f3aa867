use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};

use crate::model::{Settings, Units};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Value used when no key is configured anywhere. Never sent upstream.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

pub const GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const CACHE_TTL: Duration = Duration::from_secs(300);
/// Upper bound on entries per memoized lookup.
pub const CACHE_CAPACITY: u64 = 1_000;

pub const DEFAULT_UNITS: Units = Units::Metric;
pub const DEFAULT_FORECAST_HOURS: u32 = 24;
pub const FORECAST_HOUR_OPTIONS: [u32; 4] = [24, 48, 72, 120];

pub fn is_forecast_hour_option(hours: u32) -> bool {
    FORECAST_HOUR_OPTIONS.contains(&hours)
}

/// An OpenWeather API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// Resolve in order: environment value, config file value, placeholder.
    /// Empty strings count as unset.
    pub fn resolve(env_value: Option<String>, file_value: Option<&str>) -> Self {
        env_value
            .filter(|v| !v.trim().is_empty())
            .map(ApiKey::new)
            .or_else(|| file_value.filter(|v| !v.trim().is_empty()).map(ApiKey::new))
            .unwrap_or_else(|| ApiKey::new(PLACEHOLDER_API_KEY))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_API_KEY
    }

    /// OpenWeather keys are 32 hexadecimal characters. Anything else,
    /// including the placeholder, is treated as unconfigured.
    pub fn is_valid_format(&self) -> bool {
        self.0.len() == 32 && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            f.write_str("ApiKey(<placeholder>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// URLs of the three upstream calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub geocoding: String,
    pub current_weather: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: GEOCODING_URL.to_string(),
            current_weather: CURRENT_WEATHER_URL.to_string(),
            forecast: FORECAST_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Same paths as the public API, rooted at another host.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocoding: format!("{base}/geo/1.0/direct"),
            current_weather: format!("{base}/data/2.5/weather"),
            forecast: format!("{base}/data/2.5/forecast"),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "0123456789abcdef0123456789abcdef"
/// units = "imperial"
/// forecast_hours = 48
/// show_details = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub units: Option<Units>,
    pub forecast_hours: Option<u32>,
    pub show_details: Option<bool>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skylook", "skylook")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Effective API key: `OPENWEATHER_API_KEY`, then the file, then the placeholder.
    pub fn api_key(&self) -> ApiKey {
        ApiKey::resolve(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    /// Stored preferences with defaults filled in. An hour count outside
    /// [`FORECAST_HOUR_OPTIONS`] falls back to the default.
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();

        let forecast_hours = match self.forecast_hours {
            Some(h) if is_forecast_hour_option(h) => h,
            Some(h) => {
                tracing::warn!(
                    hours = h,
                    "ignoring forecast_hours from config, expected one of {:?}",
                    FORECAST_HOUR_OPTIONS
                );
                defaults.forecast_hours
            }
            None => defaults.forecast_hours,
        };

        Settings {
            units: self.units.unwrap_or(defaults.units),
            forecast_hours,
            show_details: self.show_details.unwrap_or(defaults.show_details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "0123456789abcdef0123456789ABCDEF";

    #[test]
    fn env_value_wins_over_file() {
        let key = ApiKey::resolve(Some("from-env".into()), Some("from-file"));
        assert_eq!(key.as_str(), "from-env");
    }

    #[test]
    fn empty_env_value_falls_through_to_file() {
        let key = ApiKey::resolve(Some("  ".into()), Some("from-file"));
        assert_eq!(key.as_str(), "from-file");
    }

    #[test]
    fn unset_everywhere_gives_placeholder() {
        let key = ApiKey::resolve(None, None);
        assert!(key.is_placeholder());
        assert!(!key.is_valid_format());
    }

    #[test]
    fn key_format_validation() {
        assert!(ApiKey::new(VALID).is_valid_format());
        assert!(ApiKey::new(format!(" {VALID} ")).is_valid_format());
        assert!(!ApiKey::new("short").is_valid_format());
        assert!(!ApiKey::new("z123456789abcdef0123456789abcdef").is_valid_format());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let shown = format!("{:?}", ApiKey::new(VALID));
        assert!(!shown.contains(VALID));
    }

    #[test]
    fn endpoints_with_base_url_keep_api_paths() {
        let endpoints = Endpoints::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(endpoints.geocoding, "http://127.0.0.1:9000/geo/1.0/direct");
        assert_eq!(endpoints.current_weather, "http://127.0.0.1:9000/data/2.5/weather");
        assert_eq!(endpoints.forecast, "http://127.0.0.1:9000/data/2.5/forecast");
    }

    #[test]
    fn settings_default_when_config_empty() {
        let settings = Config::default().settings();
        assert_eq!(settings.units, Units::Metric);
        assert_eq!(settings.forecast_hours, 24);
        assert!(settings.show_details);
    }

    #[test]
    fn settings_read_from_toml() {
        let cfg = Config::from_toml(
            r#"
            units = "imperial"
            forecast_hours = 72
            show_details = false
            "#,
        )
        .expect("valid toml");

        let settings = cfg.settings();
        assert_eq!(settings.units, Units::Imperial);
        assert_eq!(settings.forecast_hours, 72);
        assert!(!settings.show_details);
    }

    #[test]
    fn unsupported_forecast_hours_fall_back_to_default() {
        let cfg = Config { forecast_hours: Some(30), ..Config::default() };
        assert_eq!(cfg.settings().forecast_hours, DEFAULT_FORECAST_HOURS);
    }

    #[test]
    fn config_toml_roundtrip_keeps_api_key() {
        let mut cfg = Config::default();
        cfg.set_api_key(format!("{VALID}\n"));

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.api_key.as_deref(), Some(VALID));
    }
}

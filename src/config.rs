use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{IntelError, Result};
use crate::geo::GeoPoint;
use crate::view::DateRange;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "EVENT_INTEL_CONFIG";
pub const API_URL_ENV: &str = "EVENT_INTEL_API_URL";
pub const PORT_ENV: &str = "EVENT_INTEL_PORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub hotel: HotelSettings,
    pub view: ViewConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout when unset.
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HotelSettings {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub default_radius_miles: f64,
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            name: "Downtown Nashville Hotel".to_string(),
            latitude: 36.1656,
            longitude: -86.7781,
            default_radius_miles: 25.0,
        }
    }
}

impl HotelSettings {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
    pub date_range: String,
    /// Events requested per backend fetch before local filtering.
    pub fetch_size: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            date_range: "month".to_string(),
            fetch_size: 1000,
        }
    }
}

impl ViewConfig {
    pub fn default_date_range(&self) -> Result<DateRange> {
        self.date_range.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8088 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "event_intel.log".to_string(),
        }
    }
}

impl Config {
    /// Loads `.env`, then the config file (if any), then environment overrides.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            Self::from_path(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            IntelError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| IntelError::Config(format!("{} must be a port number, got '{}'", PORT_ENV, port)))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(IntelError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if !(-90.0..=90.0).contains(&self.hotel.latitude) || !(-180.0..=180.0).contains(&self.hotel.longitude) {
            return Err(IntelError::Config("hotel coordinates out of range".to_string()));
        }
        if self.view.page_size == 0 {
            return Err(IntelError::Config("view.page_size must be at least 1".to_string()));
        }
        if self.view.fetch_size == 0 {
            return Err(IntelError::Config("view.fetch_size must be at least 1".to_string()));
        }
        self.view
            .default_date_range()
            .map_err(|e| IntelError::Config(format!("view.date_range: {}", e)))?;
        Ok(())
    }
}

//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `CLIMATE__*` environment variables
//! (e.g. `CLIMATE__SERVER__PORT=8080`, `CLIMATE__DATABASE__PATH=/data/hawaii.sqlite`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use date_validator::IsoDate;
use serde::Deserialize;

use crate::rate_limit::RateLimitConfig;

/// File read when `CLIMATE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/climate.toml";
/// Variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "CLIMATE_CONFIG";
const ENV_PREFIX: &str = "CLIMATE";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub queries: QueryConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load from the file named by `CLIMATE_CONFIG` (or the default path) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from a specific TOML file (which may be absent) and the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dataset location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, opened read-only
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Resources/hawaii.sqlite"),
        }
    }
}

/// Fixed parameters of the "last twelve months" routes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Last date of the dataset's final year of observations
    pub reference_date: IsoDate,
    /// Length of the trailing window ending at `reference_date`
    pub lookback_days: u32,
    /// Station served by `/api/v1.0/tobs`
    pub tobs_station: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            reference_date: IsoDate::from_ymd(2017, 8, 23).expect("2017-08-23 is a valid date"),
            lookback_days: 365,
            tobs_station: "USC00519281".to_string(),
        }
    }
}

impl QueryConfig {
    /// First date included in the trailing window
    pub fn cutoff(&self) -> Option<IsoDate> {
        self.reference_date.days_before(self.lookback_days)
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

//! TOML-based application configuration.

use std::fmt;
use std::fs;
use std::net::IpAddr;
use std::path::Path;

use serde::Deserialize;

use crate::stats::DenominatorMode;

/// Top-level configuration parsed from TOML.
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Weekly series source.
    #[serde(default)]
    pub data: DataConfig,
    /// Forecaster settings.
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weekly series source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// CSV file holding the joined weekly series.
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "data/weekly.csv".to_string(),
        }
    }
}

/// Forecaster settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Denominator for the composite yield coefficients: `"per_predictor"` or
    /// `"shared_week"`.
    pub denominator: DenominatorMode,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl AppConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.data.path.trim().is_empty() {
            errors.push(ConfigError {
                field: "data.path".into(),
                message: "must not be empty".into(),
            });
        }

        let srv = &self.server;
        if srv.host.parse::<IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.host".into(),
                message: format!("must be an IP address, got \"{}\"", srv.host),
            });
        }
        if srv.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}

//! Core configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! database_path = "reminders.sqlite3"
//! log_level = "info"
//! log_dir = "/var/log/locreminder"
//!
//! [geofence]
//! radius_meters = 100.0
//! expiration_secs = 3600
//! ```

use crate::geofence::request::{GeofenceSettings, DEFAULT_GEOFENCE_RADIUS_METERS};
use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATABASE_FILE: &str = "reminders.sqlite3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub database_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub geofence: GeofenceConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeofenceConfig {
    pub radius_meters: f32,
    /// Omitted means the geofence never expires.
    pub expiration_secs: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
            geofence: GeofenceConfig::default(),
        }
    }
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_GEOFENCE_RADIUS_METERS,
            expiration_secs: None,
        }
    }
}

impl CoreConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database_path cannot be empty".to_string()));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be absolute, got `{}`",
                    dir.display()
                )));
            }
        }
        let radius = self.geofence.radius_meters;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "geofence.radius_meters must be positive, got {radius}"
            )));
        }
        Ok(())
    }

    pub fn geofence_settings(&self) -> GeofenceSettings {
        GeofenceSettings {
            radius_meters: self.geofence.radius_meters,
            expiration: self.geofence.expiration_secs.map(Duration::from_secs),
        }
    }
}

//! Configuration management for the ANNOTA core

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::drawer::GestureThresholds;
use crate::error::ConfigError;

/// Key under which the bookmark blob is stored
pub const DEFAULT_STORAGE_KEY: &str = "savedAnnotations";

/// Browsers give an origin roughly 5 MiB of localStorage
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub drawer: DrawerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub storage_key: String,
    pub data_dir: PathBuf,
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrawerConfig {
    pub drag_threshold: f64,
    pub velocity_threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: StoreConfig::default(),
            drawer: DrawerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from("./annota-data"),
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        let thresholds = GestureThresholds::default();
        DrawerConfig {
            drag_threshold: thresholds.distance,
            velocity_threshold: thresholds.velocity,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "annota_core=info".to_string(),
        }
    }
}

impl DrawerConfig {
    pub fn thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            distance: self.drag_threshold,
            velocity: self.velocity_threshold,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and then read the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup; missing variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            store: StoreConfig {
                storage_key: lookup("ANNOTA_STORAGE_KEY")
                    .filter(|key| !key.is_empty())
                    .unwrap_or(defaults.store.storage_key),
                data_dir: lookup("ANNOTA_STORE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.store.data_dir),
                quota_bytes: match lookup("ANNOTA_STORE_QUOTA_BYTES") {
                    // 0 disables the quota
                    Some(raw) => match parse_var::<usize>("ANNOTA_STORE_QUOTA_BYTES", &raw)? {
                        0 => None,
                        bytes => Some(bytes),
                    },
                    None => defaults.store.quota_bytes,
                },
            },
            drawer: DrawerConfig {
                drag_threshold: parse_threshold(&lookup, "ANNOTA_DRAG_THRESHOLD")?
                    .unwrap_or(defaults.drawer.drag_threshold),
                velocity_threshold: parse_threshold(&lookup, "ANNOTA_VELOCITY_THRESHOLD")?
                    .unwrap_or(defaults.drawer.velocity_threshold),
            },
            log: LogConfig {
                filter: lookup("ANNOTA_LOG").unwrap_or(defaults.log.filter),
            },
        })
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_threshold<F>(lookup: &F, var: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value: f64 = parse_var(var, &raw)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            var,
            value: raw,
            reason: "must be a finite, non-negative number".to_string(),
        });
    }
    Ok(Some(value))
}

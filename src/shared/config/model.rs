use serde::Deserialize;
use std::env;

use crate::shared::time::DEFAULT_DATE_FORMAT;

/// Environment variable naming the settings file (without extension).
pub const CONFIG_ENV_VAR: &str = "SLICE_COMPARE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub console_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            console_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

/// Defaults applied to intent options the caller leaves unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub date_column_name: String,
    /// chrono strftime pattern
    pub date_format: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            date_column_name: "date".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Loads settings from `path`; a missing file yields the defaults.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}

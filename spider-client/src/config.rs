//! Configuration for the spider console client.

use std::path::PathBuf;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Where the credential token is persisted between runs.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}
fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".spiderctl"))
        .unwrap_or_else(|| PathBuf::from(".spiderctl"))
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (SPIDER__SECTION__KEY format)
    /// 2. spiderctl.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("spiderctl")
    }

    /// Same as [`Config::load`] with an explicit config file stem.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("api.base_url", default_base_url())?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("SPIDER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_config() {
        let api = ApiConfig::default();
        assert_eq!(api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_default_logging_config() {
        assert_eq!(LoggingConfig::default().level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://nas.local:8000/api\"\n\n[storage]\ndata_dir = \"/tmp/spider\"\n",
        )
        .unwrap();

        let stem = dir.path().join("custom");
        let config = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "http://nas.local:8000/api");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/spider"));
        assert_eq!(config.logging.level, "warn");
    }
}

//! Configuration loading and management for tubescore.
//!
//! Loads settings from `tubescore.toml` with an environment variable override
//! for the API key.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("YouTube API key is not configured (set YOUTUBE_API_KEY or api.youtube_key)")]
    MissingApiKey,
}

/// API keys configuration (file value, overridable from the environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub youtube_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default location (tubescore.toml in cwd or home).
    ///
    /// A missing config file is not an error: the API key can come entirely
    /// from the `YOUTUBE_API_KEY` environment variable.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::find_config_file();
        let mut config = match config_path {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };

        // Override the API key from the environment
        if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
            config.api.youtube_key = Some(key);
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("tubescore.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("tubescore").join("tubescore.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the configured API key, failing if none is set
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .youtube_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn key_from_file_value_is_returned() {
        let config: Config = toml::from_str("[api]\nyoutube_key = \"abc123\"\n").unwrap();
        assert_eq!(config.api_key().unwrap(), "abc123");
    }

    #[test]
    fn empty_config_parses_with_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.api.youtube_key.is_none());
    }
}

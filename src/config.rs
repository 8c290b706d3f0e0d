use crate::profile::DEFAULT_HEADLINES;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid PORT value: {value}")]
    InvalidPort { value: String },

    #[error("content.headlines must not be empty")]
    EmptyHeadlines,
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub headlines: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            headlines: DEFAULT_HEADLINES.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load `config.toml` (or `$DASHBOARD_CONFIG`) if present, else defaults.
    /// `PORT` overrides the configured port.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("DASHBOARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            info!("Reading configuration from {:?}", path);
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(port) = env::var("PORT") {
            config.server.port = parse_port(&port)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.content.headlines.is_empty() {
            return Err(ConfigError::EmptyHeadlines);
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidPort {
        value: value.to_string(),
    })
}

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::names::is_path_safe;

/// Default port the HTTP server listens on
pub const DEFAULT_PORT: u16 = 8080;

/// Default address the HTTP server binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default logging filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config file extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("failed to decode JSON config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode YAML config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("provider {provider:?} not found for repository {repository:?}")]
    ProviderNotFound {
        repository: String,
        provider: String,
    },

    #[error("invalid repository name: {0:?}")]
    InvalidRepositoryName(String),

    #[error("duplicate repository name: {0:?}")]
    DuplicateRepository(String),

    #[error("provider {provider:?} is missing required field {field:?}")]
    MissingField {
        provider: String,
        field: &'static str,
    },
}

/// Service configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
    #[serde(default)]
    pub providers: IndexMap<String, ProviderConfig>,
}

/// A repository exposed under `/api/<name>`, served by a named provider
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepositoryConfig {
    pub name: String,
    pub provider: String,
}

/// Storage provider configuration, selected by its `type` field
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Local(LocalProviderConfig),
    S3(S3ProviderConfig),
}

/// Local filesystem provider configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LocalProviderConfig {
    /// Directory holding `<module>/<artifact>/` sub-directories
    pub path: PathBuf,
}

/// S3-compatible provider configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct S3ProviderConfig {
    pub bucket: String,
    /// Custom endpoint (e.g. MinIO); AWS is used when absent
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    pub region: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive such as "info" or "version_index=debug"; `RUST_LOG` takes precedence
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: true,
            file: None,
        }
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(ConfigError::UnsupportedExtension(other.to_string())),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents, format)
    }

    /// Parse and validate configuration contents in the given format.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Config = match format {
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross references and required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for repository in &self.repositories {
            if !is_path_safe(&repository.name) {
                return Err(ConfigError::InvalidRepositoryName(repository.name.clone()));
            }
            if !seen.insert(repository.name.as_str()) {
                return Err(ConfigError::DuplicateRepository(repository.name.clone()));
            }
            if !self.providers.contains_key(&repository.provider) {
                return Err(ConfigError::ProviderNotFound {
                    repository: repository.name.clone(),
                    provider: repository.provider.clone(),
                });
            }
        }

        for (name, provider) in &self.providers {
            let missing = |field| ConfigError::MissingField {
                provider: name.clone(),
                field,
            };

            match provider {
                ProviderConfig::Local(local) if local.path.as_os_str().is_empty() => {
                    return Err(missing("path"));
                }
                ProviderConfig::S3(s3) if s3.bucket.is_empty() => {
                    return Err(missing("bucket"));
                }
                ProviderConfig::S3(s3) if s3.region.is_empty() => {
                    return Err(missing("region"));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Accept the port as a number or a string; an empty string means the default.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) if text.trim().is_empty() => Ok(DEFAULT_PORT),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

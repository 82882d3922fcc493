//! Format configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via VELLUM_CONFIG)
//! 3. Environment variables

use crate::{
    DEFAULT_MAX_VERSION_LEN, DEFAULT_VERSION, MAX_MARSHALLED_SIZE, MAX_VERSION_LEN_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Envelope format configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Version written into new headers; newer headers are rejected.
    pub version: String,
    /// Width of the version tag field in bytes.
    pub max_version_len: usize,
    /// Upper bound of the window used for positional reads.
    pub max_marshalled_size: u64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            max_version_len: DEFAULT_MAX_VERSION_LEN,
            max_marshalled_size: MAX_MARSHALLED_SIZE,
        }
    }
}

impl FormatConfig {
    /// Loads configuration from file, then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("VELLUM_CONFIG") {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: FormatConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    /// Saves configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(version) = std::env::var("VELLUM_FORMAT_VERSION") {
            if !version.is_empty() {
                self.version = version;
            }
        }

        if let Ok(len) = std::env::var("VELLUM_MAX_VERSION_LEN") {
            if let Ok(n) = len.parse() {
                self.max_version_len = n;
            }
        }

        if let Ok(size) = std::env::var("VELLUM_MAX_MARSHALLED_SIZE") {
            if let Ok(n) = size.parse() {
                self.max_marshalled_size = n;
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_version_len == 0 {
            return Err(ConfigError::ValidationError(
                "max_version_len must be greater than zero".to_string(),
            ));
        }
        if self.max_version_len > MAX_VERSION_LEN_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_version_len {} exceeds the limit of {}",
                self.max_version_len, MAX_VERSION_LEN_LIMIT
            )));
        }
        if self.version.len() >= self.max_version_len {
            return Err(ConfigError::ValidationError(format!(
                "version {:?} needs {} bytes plus a terminator, but max_version_len is {}",
                self.version,
                self.version.len(),
                self.max_version_len
            )));
        }
        if !self.version.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "version {:?} must be ASCII",
                self.version
            )));
        }
        Ok(())
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_max_version_len(mut self, len: usize) -> Self {
        self.max_version_len = len;
        self
    }

    pub fn with_max_marshalled_size(mut self, size: u64) -> Self {
        self.max_marshalled_size = size;
        self
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "configuration validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

mod preset;
pub mod env;
mod validation;

use crate::domain::{Fields, Level, ParseLevelError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use crate::format::Format;
pub use preset::{COMBINED_LOG_FILE, DEFAULT_LOG_DIR, ERROR_LOG_FILE, SERVICE_NAME};

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Everything needed to build a [`crate::Logger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Threshold for every transport that does not set its own.
    #[serde(default = "default_level")]
    pub level: Level,
    /// Encoding for every transport that does not set its own.
    #[serde(default)]
    pub format: Format,
    /// Merged into every record before call-site fields.
    #[serde(default)]
    pub default_meta: Fields,
    /// Drops every record when set.
    #[serde(default)]
    pub silent: bool,
    #[serde(default)]
    pub transports: Vec<TransportConfig>,
}

fn default_level() -> Level {
    Level::Info
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: Format::Json,
            default_meta: Fields::new(),
            silent: false,
            transports: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum TransportConfig {
    Console {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<Level>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<Format>,
        #[serde(default)]
        silent: bool,
    },
    File {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<Level>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<Format>,
        #[serde(default)]
        silent: bool,
    },
}

impl TransportConfig {
    pub fn console() -> Self {
        TransportConfig::Console {
            level: None,
            format: None,
            silent: false,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        TransportConfig::File {
            path: path.into(),
            level: None,
            format: None,
            silent: false,
        }
    }

    pub fn with_level(mut self, new_level: Level) -> Self {
        match &mut self {
            TransportConfig::Console { level, .. } | TransportConfig::File { level, .. } => {
                *level = Some(new_level);
            }
        }
        self
    }

    pub fn with_format(mut self, new_format: Format) -> Self {
        match &mut self {
            TransportConfig::Console { format, .. } | TransportConfig::File { format, .. } => {
                *format = Some(new_format);
            }
        }
        self
    }

    pub fn silenced(mut self) -> Self {
        match &mut self {
            TransportConfig::Console { silent, .. } | TransportConfig::File { silent, .. } => {
                *silent = true;
            }
        }
        self
    }

    pub fn level(&self) -> Option<Level> {
        match self {
            TransportConfig::Console { level, .. } | TransportConfig::File { level, .. } => *level,
        }
    }

    pub fn format(&self) -> Option<Format> {
        match self {
            TransportConfig::Console { format, .. } | TransportConfig::File { format, .. } => {
                *format
            }
        }
    }

    pub fn is_silent(&self) -> bool {
        match self {
            TransportConfig::Console { silent, .. } | TransportConfig::File { silent, .. } => {
                *silent
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            TransportConfig::Console { .. } => None,
            TransportConfig::File { path, .. } => Some(path),
        }
    }
}

impl LoggerConfig {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_default_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_meta.insert(key.into(), value.into());
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transports.push(transport);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LoggerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `LOG_LEVEL` on top of the configured threshold, if set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        env::load_env_var(LOG_LEVEL_ENV, &mut self.level)
    }
}

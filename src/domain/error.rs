use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for building and driving the logger.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console write error: {0}")]
    Console(#[source] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to install tracing subscriber: {0}")]
    TracingInit(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid log level '{input}'. Valid levels: error, warn, info, http, verbose, debug, silly")]
pub struct ParseLevelError {
    pub input: String,
}

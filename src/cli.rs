use calculator_logger::config::DEFAULT_LOG_DIR;
use calculator_logger::{ConfigError, Fields, Level, LoggerConfig};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

/// Emit one record through the calculator-microservice logger.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logger configuration file (TOML); the calculator-service preset is used when absent
    #[arg(long, env = "LOGGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding error.log and combined.log for the preset
    #[arg(long, env = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Global threshold, overriding the configuration and LOG_LEVEL
    #[arg(long)]
    pub level: Option<Level>,

    /// Structured field as key=value; values that parse as JSON keep their type
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,

    /// Severity of the record
    pub severity: Level,

    /// Record message
    pub message: String,
}

impl Cli {
    pub fn logger_config(&self) -> Result<LoggerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => LoggerConfig::from_file(path)?,
            None => LoggerConfig::calculator_service(&self.log_dir),
        };

        config.apply_env_overrides()?;
        if let Some(level) = self.level {
            config.level = level;
        }
        Ok(config)
    }

    pub fn record_fields(&self) -> Fields {
        self.fields.iter().cloned().collect()
    }
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;

    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

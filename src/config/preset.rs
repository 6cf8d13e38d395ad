use super::{Format, LoggerConfig, TransportConfig};
use crate::domain::Level;
use std::path::Path;

pub const SERVICE_NAME: &str = "calculator-microservice";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const COMBINED_LOG_FILE: &str = "combined.log";

impl LoggerConfig {
    /// The calculator-microservice logger: JSON at `info`, tagged with the
    /// service name, writing to the console, `error.log` and `combined.log`.
    ///
    /// The deployed configuration declared its transport list twice and only
    /// the second list took effect, so the bare JSON console from the first
    /// list is not part of this preset. Exactly three transports are built.
    pub fn calculator_service(log_dir: impl AsRef<Path>) -> Self {
        let log_dir = log_dir.as_ref();

        LoggerConfig::new(Level::Info)
            .with_format(Format::Json)
            .with_default_meta("service", SERVICE_NAME)
            .with_transport(TransportConfig::console().with_format(Format::Simple))
            .with_transport(
                TransportConfig::file(log_dir.join(ERROR_LOG_FILE)).with_level(Level::Error),
            )
            .with_transport(TransportConfig::file(log_dir.join(COMBINED_LOG_FILE)))
    }
}

#![warn(rust_2018_idioms)]

pub mod config;
pub mod domain;
pub mod format;
pub mod logger;
pub mod tracing_bridge;
pub mod transport;

// Re-export main types for easy access
pub use config::{ConfigError, LoggerConfig, TransportConfig};
pub use domain::{Fields, Level, LogRecord, LoggerError};
pub use format::Format;
pub use logger::{Logger, LoggerBuilder, create_logger};
pub use tracing_bridge::{TransportLayer, install_global};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

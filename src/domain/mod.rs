//! Domain layer for calculator-logger.
//!
//! Contains the canonical types shared across all modules:
//! - `Level`: record severity (error/warn/info/http/verbose/debug/silly)
//! - `LogRecord`: an emitted record with its merged metadata
//! - `LoggerError`: top-level error type

pub mod error;
pub mod level;
pub mod record;

pub use error::{LoggerError, ParseLevelError};
pub use level::Level;
pub use record::{Fields, LogRecord, merge_fields};

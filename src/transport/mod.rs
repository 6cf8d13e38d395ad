pub mod console;
pub mod file;
pub mod memory;

use crate::domain::{Level, LogRecord, LoggerError};

pub use console::{ConsoleTransport, ConsoleWriter};
pub use file::FileTransport;
pub use memory::MemoryTransport;

/// A destination for log records with its own severity filter and encoding.
///
/// Implementations serialize their own writes; a transport may be handed
/// records from any number of threads at once.
pub trait Transport: Send + Sync {
    fn name(&self) -> &str;

    /// Effective threshold after falling back to the logger's level.
    fn level(&self) -> Level;

    fn is_silent(&self) -> bool {
        false
    }

    fn accepts(&self, level: Level) -> bool {
        !self.is_silent() && self.level().admits(level)
    }

    fn log(&self, record: &LogRecord) -> Result<(), LoggerError>;

    fn flush(&self) -> Result<(), LoggerError> {
        Ok(())
    }
}

use super::Transport;
use crate::domain::{Level, LogRecord, LoggerError};
use crate::format::Format;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Shared handle to whatever the console transport writes into.
pub type ConsoleWriter = Arc<Mutex<dyn Write + Send>>;

pub struct ConsoleTransport {
    level: Level,
    format: Format,
    silent: bool,
    writer: ConsoleWriter,
}

impl ConsoleTransport {
    pub fn stdout(level: Level, format: Format) -> Self {
        Self::with_writer(level, format, Arc::new(Mutex::new(std::io::stdout())))
    }

    pub fn with_writer(level: Level, format: Format, writer: ConsoleWriter) -> Self {
        Self {
            level,
            format,
            silent: false,
            writer,
        }
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    fn level(&self) -> Level {
        self.level
    }

    fn is_silent(&self) -> bool {
        self.silent
    }

    fn log(&self, record: &LogRecord) -> Result<(), LoggerError> {
        let line = self.format.encode(record)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}").map_err(LoggerError::Console)?;
        writer.flush().map_err(LoggerError::Console)
    }

    fn flush(&self) -> Result<(), LoggerError> {
        self.writer.lock().flush().map_err(LoggerError::Console)
    }
}

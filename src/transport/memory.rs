use super::Transport;
use crate::domain::{Level, LogRecord, LoggerError};
use crate::format::Format;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Keeps encoded lines in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the logger
/// and inspect the other.
#[derive(Clone)]
pub struct MemoryTransport {
    level: Level,
    format: Format,
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryTransport {
    pub fn new(level: Level, format: Format) -> Self {
        Self {
            level,
            format,
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Lines parsed back as JSON; lines that are not JSON are skipped.
    pub fn json_lines(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    fn level(&self) -> Level {
        self.level
    }

    fn log(&self, record: &LogRecord) -> Result<(), LoggerError> {
        let line = self.format.encode(record)?;
        self.lines.lock().push(line);
        Ok(())
    }
}

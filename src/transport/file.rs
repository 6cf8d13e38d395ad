// Append newline-delimited records to a single file.
// The handle is opened once at construction and shared behind a mutex, so
// concurrent writers never interleave partial lines.

use super::Transport;
use crate::domain::{Level, LogRecord, LoggerError};
use crate::format::Format;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileTransport {
    name: String,
    path: PathBuf,
    level: Level,
    format: Format,
    silent: bool,
    file: Mutex<BufWriter<File>>,
}

impl FileTransport {
    /// Open `path` for appending, creating missing parent directories.
    pub fn open(path: impl AsRef<Path>, level: Level, format: Format) -> Result<Self, LoggerError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| LoggerError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggerError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            name: format!("file:{}", path.display()),
            path,
            level,
            format,
            silent: false,
            file: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    fn io_error(&self, source: std::io::Error) -> LoggerError {
        LoggerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Transport for FileTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level
    }

    fn is_silent(&self) -> bool {
        self.silent
    }

    fn log(&self, record: &LogRecord) -> Result<(), LoggerError> {
        let mut line = self.format.encode(record)?;
        line.push('\n');

        let mut file = self.file.lock();
        file.write_all(line.as_bytes()).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))
    }

    fn flush(&self) -> Result<(), LoggerError> {
        let mut file = self.file.lock();
        file.flush().map_err(|e| self.io_error(e))?;
        file.get_ref().sync_data().map_err(|e| self.io_error(e))
    }
}

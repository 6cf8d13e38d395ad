//! The shared logging handle and the factory that builds it.
//!
//! A [`Logger`] is built once at startup from a [`LoggerConfig`] and passed to
//! whatever needs it. Clones are cheap and share the same transports; the file
//! handles are released when the last clone is dropped.

use crate::config::{LoggerConfig, TransportConfig};
use crate::domain::{Fields, Level, LogRecord, LoggerError, merge_fields};
use crate::transport::{ConsoleTransport, ConsoleWriter, FileTransport, Transport};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

struct Shared {
    transports: Vec<Arc<dyn Transport>>,
    silent: bool,
    write_failures: AtomicU64,
}

#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    default_meta: Arc<Fields>,
}

/// Build the logger described by `config`.
///
/// Fails fast: an invalid configuration or a log file that cannot be created
/// aborts construction instead of silently dropping a transport.
pub fn create_logger(config: &LoggerConfig) -> Result<Logger, LoggerError> {
    LoggerBuilder::new(config.clone()).build()
}

/// Builder for a [`Logger`] that allows injecting sinks next to the
/// configured ones, mainly for tests.
pub struct LoggerBuilder {
    config: LoggerConfig,
    console_writer: Option<ConsoleWriter>,
    extra: Vec<Arc<dyn Transport>>,
}

impl LoggerBuilder {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            console_writer: None,
            extra: Vec::new(),
        }
    }

    /// Send console transports to `writer` instead of stdout.
    pub fn console_writer(mut self, writer: ConsoleWriter) -> Self {
        self.console_writer = Some(writer);
        self
    }

    /// Add a transport after the configured ones.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.extra.push(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<Logger, LoggerError> {
        let config = self.config;
        config.validate()?;

        let mut transports: Vec<Arc<dyn Transport>> =
            Vec::with_capacity(config.transports.len() + self.extra.len());

        for transport_config in &config.transports {
            let level = transport_config.level().unwrap_or(config.level);
            let format = transport_config.format().unwrap_or(config.format);

            let transport: Arc<dyn Transport> = match transport_config {
                TransportConfig::Console { silent, .. } => {
                    let console = match &self.console_writer {
                        Some(writer) => ConsoleTransport::with_writer(level, format, writer.clone()),
                        None => ConsoleTransport::stdout(level, format),
                    };
                    Arc::new(console.silent(*silent))
                }
                TransportConfig::File { path, silent, .. } => {
                    Arc::new(FileTransport::open(path, level, format)?.silent(*silent))
                }
            };

            debug!(transport = transport.name(), %level, ?format, "Transport ready");
            transports.push(transport);
        }
        transports.extend(self.extra);

        info!(
            transports = transports.len(),
            level = %config.level,
            "Logger configured"
        );

        Ok(Logger {
            shared: Arc::new(Shared {
                transports,
                silent: config.silent,
                write_failures: AtomicU64::new(0),
            }),
            default_meta: Arc::new(config.default_meta),
        })
    }
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $with_fields:ident;)*) => {
        $(
            #[doc = concat!("Emit a record at `", stringify!($plain), "`.")]
            pub fn $plain(&self, message: impl Into<String>) {
                self.log(Level::$level, message, Fields::new());
            }

            #[doc = concat!("Emit a record at `", stringify!($plain), "` with structured fields.")]
            pub fn $with_fields(&self, message: impl Into<String>, fields: Fields) {
                self.log(Level::$level, message, fields);
            }
        )*
    };
}

impl Logger {
    level_methods! {
        Error => error, error_with;
        Warn => warn, warn_with;
        Info => info, info_with;
        Http => http, http_with;
        Verbose => verbose, verbose_with;
        Debug => debug, debug_with;
        Silly => silly, silly_with;
    }

    /// Emit a record at `level`. Write failures are counted and reported on
    /// stderr; they never reach the caller.
    pub fn log(&self, level: Level, message: impl Into<String>, fields: Fields) {
        if !self.is_level_enabled(level) {
            return;
        }

        let record = LogRecord::new(level, message, merge_fields(&self.default_meta, fields));
        self.write(&record);
    }

    /// Hand an already-built record to every transport that admits it.
    /// Default metadata is not merged here.
    pub fn write(&self, record: &LogRecord) {
        if self.shared.silent {
            return;
        }

        for transport in &self.shared.transports {
            if !transport.accepts(record.level()) {
                continue;
            }
            if let Err(e) = transport.log(record) {
                self.shared.write_failures.fetch_add(1, Ordering::Relaxed);
                eprintln!(
                    "calculator-logger: transport {} dropped a record: {e}",
                    transport.name()
                );
            }
        }
    }

    /// A logger sharing these transports whose default metadata also carries
    /// `fields`.
    pub fn child(&self, fields: Fields) -> Logger {
        Logger {
            shared: Arc::clone(&self.shared),
            default_meta: Arc::new(merge_fields(&self.default_meta, fields)),
        }
    }

    pub fn is_level_enabled(&self, level: Level) -> bool {
        !self.shared.silent && self.shared.transports.iter().any(|t| t.accepts(level))
    }

    /// Most verbose level any transport admits, or `None` if nothing is written.
    pub fn most_verbose_level(&self) -> Option<Level> {
        if self.shared.silent {
            return None;
        }
        self.shared
            .transports
            .iter()
            .filter(|t| !t.is_silent())
            .map(|t| t.level())
            .max_by_key(|level| level.priority())
    }

    pub fn default_meta(&self) -> &Fields {
        &self.default_meta
    }

    pub fn transport_count(&self) -> usize {
        self.shared.transports.len()
    }

    pub fn transport_names(&self) -> Vec<String> {
        self.shared
            .transports
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn write_failures(&self) -> u64 {
        self.shared.write_failures.load(Ordering::Relaxed)
    }

    /// Flush every transport. All transports are flushed even if one fails;
    /// the first error is returned.
    pub fn close(&self) -> Result<(), LoggerError> {
        let mut first_error = None;
        for transport in &self.shared.transports {
            if let Err(e) = transport.flush()
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("transports", &self.transport_names())
            .field("silent", &self.shared.silent)
            .field("default_meta", &self.default_meta)
            .finish()
    }
}

//! Route `tracing` events into a [`Logger`].
//!
//! Code that logs through the `tracing` macros ends up in the same console and
//! file transports as code holding the logger directly.

use crate::domain::{Fields, Level, LoggerError};
use crate::logger::Logger;
use serde_json::{Value, json};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};

const MESSAGE_FIELD: &str = "message";

pub struct TransportLayer {
    logger: Logger,
}

impl TransportLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Fields,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(format!("{value:?}"));
        } else {
            self.insert(field, json!(format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, json!(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, json!(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, json!(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, json!(value.to_string()));
    }
}

impl<S: Subscriber> Layer<S> for TransportLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = Level::from(*event.metadata().level());
        if !self.logger.is_level_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let message = visitor.message.unwrap_or_default();
        self.logger.log(level, message, visitor.fields);
    }
}

/// Install `logger` as the global `tracing` subscriber.
///
/// `RUST_LOG` narrows what reaches the logger; without it the filter is the
/// most verbose level any transport admits. Fails if a global subscriber is
/// already set.
pub fn install_global(logger: &Logger) -> Result<(), LoggerError> {
    let default_filter = logger
        .most_verbose_level()
        .map_or(LevelFilter::OFF, Level::to_level_filter);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default_filter.into()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(TransportLayer::new(logger.clone()))
        .try_init()
        .map_err(|e| LoggerError::TracingInit(e.to_string()))
}

use super::level::Level;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Structured metadata attached to a record.
pub type Fields = Map<String, Value>;

/// Keys owned by the record itself; fields using them are not encoded.
pub const RESERVED_KEYS: [&str; 3] = ["level", "message", "timestamp"];

/// A single emitted log record. Immutable once built.
///
/// `fields` holds the logger's default metadata already merged with the
/// call-site fields, so sinks never need to know about the logger.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: Level,
    message: String,
    fields: Fields,
    timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>, fields: Fields) -> Self {
        Self::with_timestamp(level, message, fields, Utc::now())
    }

    pub fn with_timestamp(
        level: Level,
        message: impl Into<String>,
        fields: Fields,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            fields,
            timestamp,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Fields that encoders should emit, skipping reserved keys.
    pub fn encodable_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
    }
}

/// Merge `extra` over `base`. Keys in `extra` win.
pub fn merge_fields(base: &Fields, extra: Fields) -> Fields {
    let mut merged = base.clone();
    merged.extend(extra);
    merged
}

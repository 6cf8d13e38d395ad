//! Line encoders for log records.
//!
//! `json` produces one machine-readable object per line for the file sinks;
//! `simple` produces `level: message {fields}` for people reading a terminal.
//! Both always yield a single line: line breaks inside a simple message are
//! escaped, and JSON escapes them on its own.

use crate::domain::{Fields, LogRecord};
use chrono::SecondsFormat;
use std::borrow::Cow;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Simple,
}

impl Format {
    pub fn encode(self, record: &LogRecord) -> Result<String, serde_json::Error> {
        match self {
            Format::Json => encode_json(record),
            Format::Simple => encode_simple(record),
        }
    }
}

struct JsonLine<'a>(&'a LogRecord);

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", record.level().as_str())?;
        map.serialize_entry("message", record.message())?;
        for (key, value) in record.encodable_fields() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(
            "timestamp",
            &record
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;
        map.end()
    }
}

pub fn encode_json(record: &LogRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(&JsonLine(record))
}

pub fn encode_simple(record: &LogRecord) -> Result<String, serde_json::Error> {
    let rest: Fields = record
        .encodable_fields()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut line = format!("{}: {}", record.level(), escape_line_breaks(record.message()));
    if !rest.is_empty() {
        line.push(' ');
        line.push_str(&serde_json::to_string(&rest)?);
    }
    Ok(line)
}

fn escape_line_breaks(message: &str) -> Cow<'_, str> {
    if !message.contains(['\n', '\r']) {
        return Cow::Borrowed(message);
    }
    Cow::Owned(message.replace('\r', "\\r").replace('\n', "\\n"))
}

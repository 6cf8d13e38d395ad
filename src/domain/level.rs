use super::error::ParseLevelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Record severity, ordered most severe first.
///
/// A threshold at level `L` admits every record whose priority is lower than or
/// equal to `L`'s, so an `info` threshold admits `error`, `warn` and `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Level {
    Error,
    Warn,
    Info,
    Http,
    Verbose,
    Debug,
    Silly,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Http,
        Level::Verbose,
        Level::Debug,
        Level::Silly,
    ];

    pub fn priority(self) -> u8 {
        match self {
            Level::Error => 0,
            Level::Warn => 1,
            Level::Info => 2,
            Level::Http => 3,
            Level::Verbose => 4,
            Level::Debug => 5,
            Level::Silly => 6,
        }
    }

    /// Whether a sink filtering at `self` accepts a record at `record`.
    pub fn admits(self, record: Level) -> bool {
        record.priority() <= self.priority()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Http => "http",
            Level::Verbose => "verbose",
            Level::Debug => "debug",
            Level::Silly => "silly",
        }
    }

    /// Closest `tracing` filter that lets every admitted level through.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::Error => LevelFilter::ERROR,
            Level::Warn => LevelFilter::WARN,
            Level::Info => LevelFilter::INFO,
            Level::Http | Level::Verbose | Level::Debug => LevelFilter::DEBUG,
            Level::Silly => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "http" => Ok(Level::Http),
            "verbose" => Ok(Level::Verbose),
            "debug" => Ok(Level::Debug),
            "silly" => Ok(Level::Silly),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, ParseLevelError> {
        value.parse()
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Silly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_threshold_admits_more_severe_levels_only() {
        let threshold = Level::Info;
        assert!(threshold.admits(Level::Error));
        assert!(threshold.admits(Level::Warn));
        assert!(threshold.admits(Level::Info));
        assert!(!threshold.admits(Level::Http));
        assert!(!threshold.admits(Level::Debug));
        assert!(!threshold.admits(Level::Silly));
    }

    #[test]
    fn test_error_threshold_admits_error_only() {
        for level in Level::ALL {
            assert_eq!(Level::Error.admits(level), level == Level::Error);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!(" Error ".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    }

    #[test]
    fn test_parse_unknown_level_fails() {
        let err = "fatal".parse::<Level>().unwrap_err();
        assert_eq!(err.input, "fatal");
        assert!(err.to_string().contains("fatal"));
    }

    #[test]
    fn test_display_matches_as_str() {
        for level in Level::ALL {
            assert_eq!(level.to_string(), level.as_str());
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn test_tracing_levels_map_onto_npm_levels() {
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warn);
        assert_eq!(Level::from(tracing::Level::INFO), Level::Info);
        assert_eq!(Level::from(tracing::Level::DEBUG), Level::Debug);
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Silly);
    }

    #[test]
    fn test_try_from_owned_string() {
        assert_eq!(Level::try_from("Http".to_string()), Ok(Level::Http));
        let err = Level::try_from("critical".to_string()).unwrap_err();
        assert_eq!(err.input, "critical");
    }

    #[test]
    fn test_deserialize_rejects_unknown_level() {
        let ok: Level = serde_json::from_str("\"Verbose\"").unwrap();
        assert_eq!(ok, Level::Verbose);
        assert!(serde_json::from_str::<Level>("\"loud\"").is_err());
    }
}

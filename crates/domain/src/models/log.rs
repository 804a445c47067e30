//! Application log domain models.
//!
//! The severity taxonomy is fixed and totally ordered, most severe first:
//! `Critical, Urgent, Shutdown, Error, Warning, Info, Debug`. Entries are
//! immutable once written; the only delete path is the retention purge.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use uuid::Uuid;

/// Log severity, declared most-to-least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Critical,
    Urgent,
    Shutdown,
    Error,
    Warning,
    Info,
    Debug,
}

/// All severities, in declared order. Exposed to operators for filtering.
pub const LEVELS: [LogLevel; 7] = [
    LogLevel::Critical,
    LogLevel::Urgent,
    LogLevel::Shutdown,
    LogLevel::Error,
    LogLevel::Warning,
    LogLevel::Info,
    LogLevel::Debug,
];

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Critical => "Critical",
            LogLevel::Urgent => "Urgent",
            LogLevel::Shutdown => "Shutdown",
            LogLevel::Error => "Error",
            LogLevel::Warning => "Warning",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Critical" => Ok(LogLevel::Critical),
            "Urgent" => Ok(LogLevel::Urgent),
            "Shutdown" => Ok(LogLevel::Shutdown),
            "Error" => Ok(LogLevel::Error),
            "Warning" => Ok(LogLevel::Warning),
            "Info" => Ok(LogLevel::Info),
            "Debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator-facing severity filter: one severity, or the synthetic `All`
/// selector meaning "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFilter {
    All,
    Level(LogLevel),
}

impl LevelFilter {
    /// The severity to restrict to, if any.
    pub fn level(&self) -> Option<LogLevel> {
        match self {
            LevelFilter::All => None,
            LevelFilter::Level(level) => Some(*level),
        }
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(LevelFilter::All)
        } else {
            s.parse::<LogLevel>().map(LevelFilter::Level)
        }
    }
}

/// Log entry domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub level: LogLevel,
    pub message: String,
    pub stack_trace: Option<JsonValue>,
    pub user_id: Option<String>,
    pub page_path: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Input for appending one log entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogEntry {
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub stack_trace: Option<JsonValue>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub page_path: Option<String>,
}

/// Render entries in the copy/export format: one `[timestamp] [level]
/// message` line per entry, followed by the pretty-printed stack trace when
/// present, entries joined by newlines with no trailing separator.
///
/// This exact textual shape is the export contract consumed by the admin
/// console's copy and download actions.
pub fn to_plain_text(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let line = format!(
                "[{}] [{}] {}",
                entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                entry.level,
                entry.message
            );
            match &entry.stack_trace {
                Some(trace) => format!(
                    "{}\n{}",
                    line,
                    serde_json::to_string_pretty(trace).unwrap_or_default()
                ),
                None => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(level: LogLevel, message: &str, trace: Option<JsonValue>) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            level,
            message: message.to_string(),
            stack_trace: trace,
            user_id: None,
            page_path: None,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_level_round_trip() {
        for level in LEVELS {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
        assert!("fatal".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering_most_severe_first() {
        assert!(LogLevel::Critical < LogLevel::Urgent);
        assert!(LogLevel::Error < LogLevel::Debug);
        let mut shuffled = vec![LogLevel::Debug, LogLevel::Critical, LogLevel::Error];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![LogLevel::Critical, LogLevel::Error, LogLevel::Debug]
        );
    }

    #[test]
    fn test_level_filter_parse() {
        assert_eq!("All".parse::<LevelFilter>().unwrap(), LevelFilter::All);
        assert_eq!(
            "Warning".parse::<LevelFilter>().unwrap(),
            LevelFilter::Level(LogLevel::Warning)
        );
        assert_eq!(LevelFilter::All.level(), None);
        assert_eq!(
            LevelFilter::Level(LogLevel::Info).level(),
            Some(LogLevel::Info)
        );
    }

    #[test]
    fn test_to_plain_text_single_entry() {
        let text = to_plain_text(&[entry(LogLevel::Error, "compressor fault", None)]);
        assert_eq!(text, "[2024-03-15T09:30:00.000Z] [Error] compressor fault");
    }

    #[test]
    fn test_to_plain_text_with_stack_trace() {
        let trace = serde_json::json!({"filename": "app.js", "lineno": 12});
        let text = to_plain_text(&[entry(LogLevel::Critical, "boom", Some(trace))]);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "[2024-03-15T09:30:00.000Z] [Critical] boom"
        );
        // Pretty-printed JSON block follows on indented lines.
        assert_eq!(lines.next().unwrap(), "{");
        assert!(text.contains("  \"filename\": \"app.js\""));
    }

    #[test]
    fn test_to_plain_text_joins_without_trailing_newline() {
        let text = to_plain_text(&[
            entry(LogLevel::Info, "first", None),
            entry(LogLevel::Debug, "second", None),
        ]);
        assert_eq!(text.matches("\n").count(), 1);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_to_plain_text_empty() {
        assert_eq!(to_plain_text(&[]), "");
    }
}

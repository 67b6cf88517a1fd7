//! Log record and line format

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use super::LogLevel;

/// Timestamp layout of a formatted line (`2026-10-18 09:15:02,417`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// A single log message on its way through filters and handlers.
///
/// Filters receive `&mut LogRecord` and may rewrite `message`; handlers run
/// in order over the same record, so a rewrite is seen by later handlers.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger that produced the record
    pub name: String,

    /// Severity
    pub level: LogLevel,

    /// Message text
    pub message: String,

    /// Creation time
    pub created: DateTime<Local>,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(name: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            message: message.into(),
            created: Local::now(),
        }
    }

    /// Render as `<timestamp> <LEVEL> <name> <message>`
    pub fn format(&self) -> String {
        format!(
            "{} {} {} {}",
            self.created.format(TIMESTAMP_FORMAT),
            self.level,
            self.name,
            self.message
        )
    }
}

/// Header fields of a formatted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineHeader<'a> {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub name: &'a str,
    pub message: &'a str,
}

/// Split a formatted line back into its parts.
///
/// Returns `None` for lines that don't start with a timestamp and level,
/// i.e. continuation lines of a multi-line message.
pub(crate) fn parse_line(line: &str) -> Option<LineHeader<'_>> {
    let mut parts = line.splitn(5, ' ');
    let date = parts.next()?;
    let time = parts.next()?;
    let level = LogLevel::parse(parts.next()?)?;
    let name = parts.next()?;
    let message = parts.next().unwrap_or("");

    let naive =
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), TIMESTAMP_FORMAT).ok()?;
    let timestamp = Local.from_local_datetime(&naive).earliest()?;

    Some(LineHeader {
        timestamp,
        level,
        name,
        message,
    })
}

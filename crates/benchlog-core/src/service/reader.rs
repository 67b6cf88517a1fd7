//! Reading records back from a log file (tail behavior)

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::domain::parse_line;
use crate::error::{LoggerError, Result};
use crate::LogLevel;

/// A record parsed from a log file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Local>,

    #[serde(rename = "lvl")]
    pub level: LogLevel,

    pub logger: String,

    /// Message including any continuation lines
    #[serde(rename = "msg")]
    pub message: String,
}

/// Read the last `limit` records of a log file, oldest first.
///
/// Lines that don't start with a timestamp belong to the record above them.
/// Lines before the first record are skipped. A missing file reads as empty.
pub fn read_recent(path: &Path, limit: usize, min_level: Option<LogLevel>) -> Result<Vec<LogEntry>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(LoggerError::io(path, e)),
    };

    let mut entries: Vec<LogEntry> = Vec::new();
    let mut orphans = 0usize;
    for line in content.lines() {
        match parse_line(line) {
            Some(header) => entries.push(LogEntry {
                timestamp: header.timestamp,
                level: header.level,
                logger: header.name.to_string(),
                message: header.message.to_string(),
            }),
            None => match entries.last_mut() {
                Some(entry) => {
                    entry.message.push('\n');
                    entry.message.push_str(line);
                }
                None => orphans += 1,
            },
        }
    }
    if orphans > 0 {
        debug!("[LogReader] Skipped {} leading lines in {:?}", orphans, path);
    }

    let mut recent: Vec<LogEntry> = entries
        .into_iter()
        .rev() // Start from end (most recent)
        .filter(|entry| min_level.is_none_or(|lvl| entry.level >= lvl))
        .take(limit)
        .collect();

    recent.reverse(); // Return in chronological order
    Ok(recent)
}

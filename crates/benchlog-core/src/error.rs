//! Library error type

use std::path::PathBuf;

/// Errors raised while creating loggers or writing records.
///
/// Cache lookups never fail; everything here comes from the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Creating a directory, opening, renaming or writing a log file failed
    #[error("log file I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compressing a rotated backup failed
    #[error("failed to compress rotated log {}: {source}", .path.display())]
    Compress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoggerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory the failure relates to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Compress { path, .. } => path,
        }
    }
}

pub type Result<T, E = LoggerError> = std::result::Result<T, E>;

//! Size-based rotating log file

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{LoggerError, Result};
use crate::LogConfig;

/// When and how a log file is rotated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once a write would take the file to this size; 0 disables
    pub max_bytes: u64,

    /// Backups kept as `<file>.1` .. `<file>.N`; 0 disables rotation
    pub backup_count: usize,

    /// Gzip each backup (`<file>.N.gz`)
    pub compress: bool,
}

impl From<&LogConfig> for RotationPolicy {
    fn from(config: &LogConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
            backup_count: config.backup_count,
            compress: config.compress,
        }
    }
}

impl RotationPolicy {
    fn enabled(&self) -> bool {
        self.max_bytes > 0 && self.backup_count > 0
    }
}

/// Appends lines to a file, shifting it into numbered backups when full.
///
/// `<file>` is always the newest; `<file>.1` the most recent backup and
/// `<file>.N` the oldest.
pub struct RotatingFileHandler {
    path: PathBuf,
    file: File,
    size: u64,
    policy: RotationPolicy,
}

impl RotatingFileHandler {
    /// Open (creating parent directories and the file) for appending
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy) -> Result<Self> {
        let path = path.into();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| LoggerError::io(dir, e))?;
        }

        let file = open_append(&path)?;
        let size = file
            .metadata()
            .map_err(|e| LoggerError::io(&path, e))?
            .len();

        Ok(Self {
            path,
            file,
            size,
            policy,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Current size of the active file in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Path of backup number `index` (1 = newest)
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let suffix = if self.policy.compress {
            format!(".{}.gz", index)
        } else {
            format!(".{}", index)
        };
        let mut name = self.path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Write one line (a newline is appended)
    pub fn emit(&mut self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let len = buf.len() as u64;

        // Other processes may append to the same file
        self.size = self
            .file
            .metadata()
            .map_err(|e| LoggerError::io(&self.path, e))?
            .len();

        if self.should_rollover(len) {
            self.rollover()?;
        }

        self.file
            .write_all(buf.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|e| LoggerError::io(&self.path, e))?;
        self.size += len;

        Ok(())
    }

    fn should_rollover(&self, incoming: u64) -> bool {
        self.policy.enabled() && self.size > 0 && self.size + incoming >= self.policy.max_bytes
    }

    /// Where the active file is parked while backups are shifted
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".rotating");
        PathBuf::from(name)
    }

    /// Shift backups up by one and start a fresh file.
    ///
    /// The active file is moved aside and reopened before any backup is
    /// touched, so a failure while shifting leaves a fresh active file.
    /// The parked file is picked up again by the next rollover.
    pub fn rollover(&mut self) -> Result<()> {
        debug!("[RotatingFileHandler] Rotating {:?}", self.path);

        let staged = self.staging_path();
        if staged.exists() {
            warn!(
                "[RotatingFileHandler] Finishing interrupted rotation of {:?}",
                self.path
            );
            self.shift_into_backups(&staged)?;
        }

        replace(&self.path, &staged)?;
        self.file = open_append(&self.path)?;
        self.size = 0;
        self.shift_into_backups(&staged)?;

        info!(
            "[RotatingFileHandler] Rotated {:?} ({} backups kept)",
            self.path, self.policy.backup_count
        );
        Ok(())
    }

    /// Move every backup up one slot, then `staged` into slot 1.
    /// Gaps left by an earlier partial shift are skipped.
    fn shift_into_backups(&self, staged: &Path) -> Result<()> {
        for index in (1..self.policy.backup_count).rev() {
            let src = self.backup_path(index);
            if src.exists() {
                let dst = self.backup_path(index + 1);
                replace(&src, &dst)?;
            }
        }

        if self.policy.compress {
            compress_into(staged, &self.backup_path(1))?;
            fs::remove_file(staged).map_err(|e| LoggerError::io(staged, e))
        } else {
            replace(staged, &self.backup_path(1))
        }
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::io(path, e))
}

/// Rename `src` over `dst`, removing `dst` first where the platform needs it
fn replace(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        fs::remove_file(dst).map_err(|e| LoggerError::io(dst, e))?;
    }
    fs::rename(src, dst).map_err(|e| LoggerError::io(src, e))
}

fn compress_into(src: &Path, dst: &Path) -> Result<()> {
    let compress = || -> io::Result<()> {
        let content = fs::read(src)?;
        let file = File::create(dst)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&content)?;
        encoder.finish()?;
        Ok(())
    };
    compress().map_err(|source| LoggerError::Compress {
        path: src.to_path_buf(),
        source,
    })
}

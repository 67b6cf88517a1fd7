//! Log file layout and rotation configuration

use std::path::{Path, PathBuf};
use tracing::warn;

use super::LogLevel;

/// Environment variable names read by [`LogConfig::from_env`].
pub mod keys {
    /// Initial minimum level ("debug", "info", ...)
    pub const LEVEL: &str = "BENCHLOG_LEVEL";
    /// Directory of bench-wide logs
    pub const BENCH_DIR: &str = "BENCHLOG_BENCH_DIR";
    /// Directory containing one folder per site
    pub const SITES_DIR: &str = "BENCHLOG_SITES_DIR";
    /// Size in bytes at which a log file is rotated (u64)
    pub const MAX_BYTES: &str = "BENCHLOG_MAX_BYTES";
    /// Number of rotated backups to keep (usize)
    pub const BACKUP_COUNT: &str = "BENCHLOG_BACKUP_COUNT";
    /// Gzip rotated backups ("true"/"false")
    pub const COMPRESS: &str = "BENCHLOG_COMPRESS";
}

/// Rotate once a file would reach this many bytes
pub const DEFAULT_MAX_BYTES: u64 = 100_000;

/// Rotated backups kept per log file
pub const DEFAULT_BACKUP_COUNT: usize = 20;

/// Configuration for log files and rotation
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory for bench-wide logs, relative to the working directory
    /// (the sites folder) by default
    pub bench_log_dir: PathBuf,

    /// Directory containing one folder per site
    pub sites_root: PathBuf,

    /// Maximum file size before rotation (bytes)
    pub max_bytes: u64,

    /// Maximum number of rotated files to keep
    pub backup_count: usize,

    /// Whether to gzip rotated files
    pub compress: bool,

    /// Initial minimum level of the registry
    pub level: LogLevel,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            bench_log_dir: Path::new("..").join("logs"),
            sites_root: PathBuf::from("."),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            compress: false,
            level: LogLevel::DEFAULT,
        }
    }
}

impl LogConfig {
    /// Config rooted at a bench directory: bench logs in `<bench>/logs`,
    /// sites in `<bench>/sites`.
    pub fn for_bench(bench_root: impl AsRef<Path>) -> Self {
        let bench_root = bench_root.as_ref();
        Self {
            bench_log_dir: bench_root.join("logs"),
            sites_root: bench_root.join("sites"),
            ..Self::default()
        }
    }

    /// Build from `BENCHLOG_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup over the defaults.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(keys::LEVEL) {
            config.level = LogLevel::resolve(Some(&value));
        }
        if let Some(value) = lookup(keys::BENCH_DIR).filter(|v| !v.is_empty()) {
            config.bench_log_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(keys::SITES_DIR).filter(|v| !v.is_empty()) {
            config.sites_root = PathBuf::from(value);
        }
        if let Some(value) = lookup(keys::MAX_BYTES) {
            match value.trim().parse() {
                Ok(max_bytes) => config.max_bytes = max_bytes,
                Err(_) => warn!("[LogConfig] Ignoring invalid {}: {}", keys::MAX_BYTES, value),
            }
        }
        if let Some(value) = lookup(keys::BACKUP_COUNT) {
            match value.trim().parse() {
                Ok(count) => config.backup_count = count,
                Err(_) => warn!("[LogConfig] Ignoring invalid {}: {}", keys::BACKUP_COUNT, value),
            }
        }
        if let Some(value) = lookup(keys::COMPRESS) {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => config.compress = true,
                "0" | "false" | "no" => config.compress = false,
                _ => warn!("[LogConfig] Ignoring invalid {}: {}", keys::COMPRESS, value),
            }
        }

        config
    }

    /// Bench-wide log file of a module
    pub fn bench_log_file(&self, module: &str) -> PathBuf {
        self.bench_log_dir.join(log_file_name(module))
    }

    /// Log directory of a site
    pub fn site_log_dir(&self, site: &str) -> PathBuf {
        self.sites_root.join(sanitize_component(site)).join("logs")
    }

    /// Site log file of a module
    pub fn site_log_file(&self, site: &str, module: &str) -> PathBuf {
        self.site_log_dir(site).join(log_file_name(module))
    }
}

fn log_file_name(module: &str) -> String {
    format!("{}.log", sanitize_component(module))
}

/// Make a module or site name safe to use as a single path component
fn sanitize_component(name: &str) -> String {
    let name = name.replace(['/', '\\', ':'], "_");
    if name == "." || name == ".." {
        name.replace('.', "_")
    } else {
        name
    }
}

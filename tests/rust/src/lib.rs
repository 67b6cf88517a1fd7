//! Shared test utilities and fixtures for benchlog integration tests.

pub use benchlog_core::{
    LogConfig, LogFilter, LogLevel, LogRecord, Logger, LoggerOptions, LoggerRegistry,
    SiteContext, SiteSelector,
};

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway bench: `<tmp>/logs` for bench logs, `<tmp>/sites/<site>/logs`
/// for site logs, plus a registry configured for it.
pub struct BenchFixture {
    pub dir: TempDir,
    pub registry: LoggerRegistry,
}

impl BenchFixture {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Customize the config before the registry is built
    pub fn with_config(customize: impl FnOnce(&mut LogConfig)) -> Self {
        let dir = tempfile::tempdir().expect("create temp bench");
        let mut config = LogConfig::for_bench(dir.path());
        customize(&mut config);
        Self {
            dir,
            registry: LoggerRegistry::new(config),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn bench_log(&self, module: &str) -> PathBuf {
        self.registry.config().bench_log_file(module)
    }

    pub fn site_log(&self, site: &str, module: &str) -> PathBuf {
        self.registry.config().site_log_file(site, module)
    }

    /// Contents of a log file, empty if it doesn't exist
    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    /// Non-empty lines of a log file
    pub fn lines(&self, path: &Path) -> Vec<String> {
        self.read(path)
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for BenchFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for a bench-only logger
pub fn bench_only() -> LoggerOptions {
    LoggerOptions::new().site(false)
}

//! Process tracing for the benchlog binary
//!
//! The tool's own diagnostics, separate from the module logs it writes:
//! - Console: compact, on stderr so command output stays clean
//! - File: daily rotation in the bench log directory (benchlog.YYYY-MM-DD.log)

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prefix of the daily diagnostics file
pub const LOG_PREFIX: &str = "benchlog";

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "warn,benchlog=info,benchlog_core=info";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer and must be kept alive for
/// the duration of the program.
pub fn init_tracing(logs_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create logs directory {:?}", logs_dir))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)
        .context("Failed to create log file appender")?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG takes precedence; --verbose raises our crates to debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,benchlog=debug,benchlog_core=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_target(false);

    // File layer: no colors, include more detail
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Tracing subscriber already installed")?;

    Ok(guard)
}

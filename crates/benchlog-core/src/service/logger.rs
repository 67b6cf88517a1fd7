//! Logger - level gate, filters and ordered file handlers

use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::filter::LogFilter;
use super::rotating::RotatingFileHandler;
use crate::error::Result;
use crate::{LogLevel, LogRecord, SiteContext};

/// Where a handler writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerScope {
    /// Bench-wide file shared by all sites
    Bench,
    /// The site's own log directory
    Site,
}

/// Rotating file writer shared by every handler of the same path
pub type SharedWriter = Arc<Mutex<RotatingFileHandler>>;

/// A file sink plus the filters guarding it
pub struct Handler {
    scope: HandlerScope,
    writer: SharedWriter,
    filters: Vec<Arc<dyn LogFilter>>,
}

impl Handler {
    pub fn new(scope: HandlerScope, writer: SharedWriter) -> Self {
        Self {
            scope,
            writer,
            filters: Vec::new(),
        }
    }

    /// Whether both handlers write through the same file writer
    pub fn shares_writer(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    pub fn add_filter(&mut self, filter: Arc<dyn LogFilter>) {
        self.filters.push(filter);
    }

    pub fn scope(&self) -> HandlerScope {
        self.scope
    }

    pub fn path(&self) -> PathBuf {
        self.writer.lock().path().to_path_buf()
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Run this handler's filters, then write if they all pass
    fn handle(&self, record: &mut LogRecord, ctx: &SiteContext) -> Result<bool> {
        for filter in &self.filters {
            if !filter.filter(record, ctx) {
                return Ok(false);
            }
        }
        self.writer.lock().emit(&record.format())?;
        Ok(true)
    }
}

/// A named logger.
///
/// Records never leave the logger: there is no parent to propagate to and
/// nothing is forwarded to the process-wide `tracing` subscriber.
pub struct Logger {
    name: String,
    level: LogLevel,
    site: Option<String>,
    handlers: Vec<Handler>,
    filters: Vec<Arc<dyn LogFilter>>,
}

impl Logger {
    pub fn new(name: impl Into<String>, level: LogLevel, site: Option<String>) -> Self {
        Self {
            name: name.into(),
            level,
            site,
            handlers: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    pub fn add_filter(&mut self, filter: Arc<dyn LogFilter>) {
        self.filters.push(filter);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum level written by this logger
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Site whose directory this logger also writes to
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Files written by this logger, in handler order
    pub fn handler_paths(&self) -> Vec<PathBuf> {
        self.handlers.iter().map(Handler::path).collect()
    }

    /// Whether any handler writes to `path`
    pub fn writes_to(&self, path: &Path) -> bool {
        self.handlers.iter().any(|h| h.path() == path)
    }

    /// Log a message.
    ///
    /// Returns the number of handlers that wrote the record. Write failures
    /// are returned as-is; handlers after the failing one are skipped.
    pub fn log(
        &self,
        ctx: &SiteContext,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Result<usize> {
        if !self.is_enabled_for(level) {
            return Ok(0);
        }

        let mut record = LogRecord::new(&self.name, level, message);

        for filter in &self.filters {
            if !filter.filter(&mut record, ctx) {
                return Ok(0);
            }
        }

        let mut written = 0;
        for handler in &self.handlers {
            if handler.handle(&mut record, ctx)? {
                written += 1;
            }
        }
        Ok(written)
    }

    pub fn debug(&self, ctx: &SiteContext, message: impl Into<String>) -> Result<usize> {
        self.log(ctx, LogLevel::Debug, message)
    }

    pub fn info(&self, ctx: &SiteContext, message: impl Into<String>) -> Result<usize> {
        self.log(ctx, LogLevel::Info, message)
    }

    pub fn warning(&self, ctx: &SiteContext, message: impl Into<String>) -> Result<usize> {
        self.log(ctx, LogLevel::Warning, message)
    }

    pub fn error(&self, ctx: &SiteContext, message: impl Into<String>) -> Result<usize> {
        self.log(ctx, LogLevel::Error, message)
    }

    pub fn critical(&self, ctx: &SiteContext, message: impl Into<String>) -> Result<usize> {
        self.log(ctx, LogLevel::Critical, message)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("site", &self.site)
            .field("handlers", &self.handler_paths())
            .field("filters", &self.filters.len())
            .finish()
    }
}

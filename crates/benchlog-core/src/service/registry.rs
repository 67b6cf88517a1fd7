//! Logger registry - one cached logger per module and site

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::filter::{LogFilter, SiteContextFilter};
use super::logger::{Handler, HandlerScope, Logger, SharedWriter};
use super::reader::{read_recent, LogEntry};
use super::rotating::{RotatingFileHandler, RotationPolicy};
use crate::error::Result;
use crate::{LogConfig, LogLevel, SiteContext};

/// Logger used when no module name is given
pub const DEFAULT_MODULE: &str = "frappe";

/// Cache key for loggers that aren't bound to a site
pub const ALL_SITES_KEY: &str = "all";

/// Which site a logger writes under, besides the bench-wide file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SiteSelector {
    /// Use the site of the context passed to `get_logger`
    #[default]
    Current,
    /// Use this site; an empty name means no site
    Named(String),
    /// Bench-wide only
    Bench,
}

impl SiteSelector {
    fn resolve(&self, ctx: &SiteContext) -> Option<String> {
        match self {
            Self::Current => ctx.site().map(str::to_string),
            Self::Named(site) if !site.is_empty() => Some(site.clone()),
            Self::Named(_) | Self::Bench => None,
        }
    }
}

impl From<bool> for SiteSelector {
    fn from(allow_site: bool) -> Self {
        if allow_site {
            Self::Current
        } else {
            Self::Bench
        }
    }
}

impl From<&str> for SiteSelector {
    fn from(site: &str) -> Self {
        Self::Named(site.to_string())
    }
}

impl From<String> for SiteSelector {
    fn from(site: String) -> Self {
        Self::Named(site)
    }
}

/// Options for [`LoggerRegistry::get_logger`]
#[derive(Clone, Default)]
pub struct LoggerOptions {
    /// Append site and form data to bench-wide records
    pub with_more_info: bool,

    /// Site selection
    pub site: SiteSelector,

    /// Extra filter attached to the logger
    pub filter: Option<Arc<dyn LogFilter>>,

    /// Filter used when `with_more_info` is set
    pub context_filter: SiteContextFilter,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_more_info(mut self, with_more_info: bool) -> Self {
        self.with_more_info = with_more_info;
        self
    }

    pub fn site(mut self, site: impl Into<SiteSelector>) -> Self {
        self.site = site.into();
        self
    }

    pub fn filter(mut self, filter: Arc<dyn LogFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn context_filter(mut self, filter: SiteContextFilter) -> Self {
        self.context_filter = filter;
        self
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("with_more_info", &self.with_more_info)
            .field("site", &self.site)
            .field("filter", &self.filter.is_some())
            .field("context_filter", &self.context_filter)
            .finish()
    }
}

struct RegistryState {
    level: LogLevel,
    /// module -> site (or "all") -> logger
    loggers: HashMap<String, HashMap<String, Arc<Logger>>>,
    /// One writer per file, shared by every logger writing to it.
    /// Survives level changes so old and new loggers rotate the same file.
    writers: HashMap<PathBuf, SharedWriter>,
}

impl RegistryState {
    fn writer(&mut self, path: PathBuf, policy: RotationPolicy) -> Result<SharedWriter> {
        if let Some(writer) = self.writers.get(&path) {
            return Ok(writer.clone());
        }
        let writer = Arc::new(Mutex::new(RotatingFileHandler::open(&path, policy)?));
        self.writers.insert(path, writer.clone());
        Ok(writer)
    }
}

/// Creates and caches loggers.
///
/// Owned by the application and shared by reference (or `Arc`). Holds the
/// current minimum level; changing it drops every cached logger so later
/// lookups rebuild with the new level.
pub struct LoggerRegistry {
    config: LogConfig,
    state: RwLock<RegistryState>,
}

impl LoggerRegistry {
    /// Create a registry starting at `config.level`
    pub fn new(config: LogConfig) -> Self {
        let level = config.level;
        Self {
            config,
            state: RwLock::new(RegistryState {
                level,
                loggers: HashMap::new(),
                writers: HashMap::new(),
            }),
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Current minimum level for new loggers
    pub fn log_level(&self) -> LogLevel {
        self.state.read().level
    }

    /// Set the minimum level (case-insensitive name, falling back to DEBUG)
    /// and drop all cached loggers.
    pub fn set_log_level(&self, level: &str) {
        let resolved = LogLevel::resolve(Some(level));
        let mut state = self.state.write();
        state.level = resolved;
        state.loggers.clear();
        info!("[LoggerRegistry] Log level set to {}", resolved);
    }

    /// Cached logger for a module and site, if any
    pub fn try_get(&self, module: &str, site: Option<&str>) -> Option<Arc<Logger>> {
        let state = self.state.read();
        lookup(&state, module, site_key(site))
    }

    /// Number of cached loggers
    pub fn len(&self) -> usize {
        self.state.read().loggers.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get or create the logger for a module.
    ///
    /// An empty module name selects [`DEFAULT_MODULE`] with context
    /// injection turned on. The cache is keyed by module and site only, so
    /// the options of the first call win until the cache is cleared.
    pub fn get_logger(
        &self,
        module: &str,
        options: LoggerOptions,
        ctx: &SiteContext,
    ) -> Result<Arc<Logger>> {
        let site = options.site.resolve(ctx);
        let (module, with_more_info) = if module.is_empty() {
            (DEFAULT_MODULE, true)
        } else {
            (module, options.with_more_info)
        };
        let key = site_key(site.as_deref());

        // Fast path: logger exists
        if let Some(logger) = lookup(&self.state.read(), module, key) {
            return Ok(logger);
        }

        // Slow path: build under the write lock
        let mut state = self.state.write();

        // Double-check (another thread might have created it)
        if let Some(logger) = lookup(&state, module, key) {
            return Ok(logger);
        }

        let logger = Arc::new(self.build_logger(
            &mut state,
            module,
            site.clone(),
            with_more_info,
            &options,
        )?);

        state
            .loggers
            .entry(module.to_string())
            .or_default()
            .insert(key.to_string(), logger.clone());

        debug!(
            "[LoggerRegistry] Created logger '{}' for '{}' at {}",
            module, key, state.level
        );
        Ok(logger)
    }

    fn build_logger(
        &self,
        state: &mut RegistryState,
        module: &str,
        site: Option<String>,
        with_more_info: bool,
        options: &LoggerOptions,
    ) -> Result<Logger> {
        let policy = RotationPolicy::from(&self.config);
        let mut logger = Logger::new(module, state.level, site.clone());

        let mut bench = Handler::new(
            HandlerScope::Bench,
            state.writer(self.config.bench_log_file(module), policy)?,
        );
        if with_more_info {
            bench.add_filter(Arc::new(options.context_filter));
        }
        logger.add_handler(bench);

        if let Some(site) = &site {
            logger.add_handler(Handler::new(
                HandlerScope::Site,
                state.writer(self.config.site_log_file(site, module), policy)?,
            ));
        }

        if let Some(filter) = &options.filter {
            logger.add_filter(filter.clone());
        }

        Ok(logger)
    }

    /// Most recent records of a module's log.
    ///
    /// Reads the site's file when `site` is given, the bench-wide file
    /// otherwise.
    pub fn recent_records(
        &self,
        module: &str,
        site: Option<&str>,
        limit: usize,
        min_level: Option<LogLevel>,
    ) -> Result<Vec<LogEntry>> {
        let module = if module.is_empty() { DEFAULT_MODULE } else { module };
        let path = match site.filter(|s| !s.is_empty()) {
            Some(site) => self.config.site_log_file(site, module),
            None => self.config.bench_log_file(module),
        };
        read_recent(&path, limit, min_level)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("config", &self.config)
            .field("level", &self.log_level())
            .field("cached", &self.len())
            .finish()
    }
}

fn site_key(site: Option<&str>) -> &str {
    site.filter(|s| !s.is_empty()).unwrap_or(ALL_SITES_KEY)
}

fn lookup(state: &RegistryState, module: &str, key: &str) -> Option<Arc<Logger>> {
    state.loggers.get(module)?.get(key).cloned()
}

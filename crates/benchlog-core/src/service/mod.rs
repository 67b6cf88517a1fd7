//! Logging services
//!
//! File handlers, filters, loggers and the registry that caches them.

mod filter;
mod logger;
mod reader;
mod registry;
mod rotating;

pub use filter::{LogFilter, SiteContextFilter, TaggedRecordPolicy, FORM_DICT_MARKER};
pub use logger::{Handler, HandlerScope, Logger, SharedWriter};
pub use reader::{read_recent, LogEntry};
pub use registry::{
    LoggerOptions, LoggerRegistry, SiteSelector, ALL_SITES_KEY, DEFAULT_MODULE,
};
pub use rotating::{RotatingFileHandler, RotationPolicy};

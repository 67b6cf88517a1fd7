//! # Benchlog Core Library
//!
//! Named, cached loggers for a multi-site bench.
//!
//! ## Modules
//!
//! - `domain` - Log levels, records, request context and configuration
//! - `service` - Rotating file handlers, filters, loggers and the registry
//! - `error` - Library error type
//!
//! Every logger writes to a bench-wide file (`<bench_log_dir>/<module>.log`)
//! and, when a site is known, to `<sites_root>/<site>/logs/<module>.log`.
//! Loggers are created through a [`LoggerRegistry`] owned by the
//! application, which hands out one shared [`Logger`] per module and site.

pub mod domain;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use error::{LoggerError, Result};
pub use service::*;

//! Domain types
//!
//! Value objects shared by the logging services:
//! - `LogLevel` severity scale and parsing
//! - `LogRecord` a single message flowing through filters and handlers
//! - `SiteContext` request-scoped site and form data
//! - `LogConfig` file layout and rotation policy

pub mod config;
mod context;
mod level;
mod record;

pub use config::*;
pub use context::*;
pub use level::*;
pub use record::{LogRecord, TIMESTAMP_FORMAT};
pub(crate) use record::parse_line;

//! Record filters

use crate::{LogRecord, SiteContext};

/// Marker whose presence means request context was already appended
pub const FORM_DICT_MARKER: &str = "Form Dict";

/// Decides whether a record is written, and may rewrite it.
///
/// Attached either to a logger (checked once per record) or to a single
/// handler (checked before that handler writes).
pub trait LogFilter: Send + Sync {
    /// Return `false` to drop the record
    fn filter(&self, record: &mut LogRecord, ctx: &SiteContext) -> bool;
}

impl<F> LogFilter for F
where
    F: Fn(&mut LogRecord, &SiteContext) -> bool + Send + Sync,
{
    fn filter(&self, record: &mut LogRecord, ctx: &SiteContext) -> bool {
        self(record, ctx)
    }
}

/// What [`SiteContextFilter`] does with a record that already carries
/// request context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaggedRecordPolicy {
    /// Drop the record
    #[default]
    Suppress,
    /// Write the record unchanged
    Pass,
}

/// Appends the current site and request form data to each message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteContextFilter {
    tagged: TaggedRecordPolicy,
}

impl SiteContextFilter {
    pub fn new(tagged: TaggedRecordPolicy) -> Self {
        Self { tagged }
    }
}

impl LogFilter for SiteContextFilter {
    fn filter(&self, record: &mut LogRecord, ctx: &SiteContext) -> bool {
        if record.message.contains(FORM_DICT_MARKER) {
            return self.tagged == TaggedRecordPolicy::Pass;
        }

        record.message = format!(
            "{}\nSite: {}\n{}: {}",
            record.message,
            ctx.site_display(),
            FORM_DICT_MARKER,
            ctx.form_dict_display()
        );
        true
    }
}

//! Request-scoped site context

use serde_json::Value;

/// Text written in place of a missing site or form dict
pub const ABSENT: &str = "None";

/// Site and request data for the current unit of work.
///
/// Supplied by whatever handles the request and passed explicitly to
/// [`LoggerRegistry::get_logger`](crate::LoggerRegistry::get_logger) (for
/// site detection) and to every log call (for context injection).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContext {
    /// Current site, if the request is bound to one
    pub site: Option<String>,

    /// Form data of the current request
    pub form_dict: Option<Value>,
}

impl SiteContext {
    /// Context outside of any request
    pub fn none() -> Self {
        Self::default()
    }

    /// Context bound to a site
    pub fn for_site(site: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
            form_dict: None,
        }
    }

    /// Attach request form data
    pub fn with_form_dict(mut self, form_dict: Value) -> Self {
        self.form_dict = Some(form_dict);
        self
    }

    /// Current site, ignoring empty names
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref().filter(|s| !s.is_empty())
    }

    pub fn site_display(&self) -> String {
        self.site().unwrap_or(ABSENT).to_string()
    }

    pub fn form_dict_display(&self) -> String {
        self.form_dict
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| ABSENT.to_string())
    }
}

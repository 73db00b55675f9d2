//! Redirect URL templates.

use ado_core::UrlConfig;
use url::form_urlencoded;

use crate::table::Template;

const PLACEHOLDER: &str = "{}";

/// Fills the configured redirect templates.
#[derive(Debug, Clone, Default)]
pub struct UrlTemplates {
    config: UrlConfig,
}

impl UrlTemplates {
    pub fn new(config: UrlConfig) -> Self {
        Self { config }
    }

    /// URL for a template redirect, with the payload form-encoded.
    pub fn redirect(&self, template: Template, payload: &str) -> String {
        let pattern = match template {
            Template::Shopping => &self.config.shopping,
            Template::WebSearch => &self.config.web_search,
            Template::Quote => &self.config.quote,
        };
        fill(pattern, &encode(payload))
    }

    /// Community site URL for a path such as `/r/rust`.
    ///
    /// The path comes from the engine and is trimmed; a missing leading
    /// slash is added.
    pub fn community(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with('/') {
            fill(&self.config.community, path)
        } else {
            fill(&self.config.community, &format!("/{path}"))
        }
    }
}

fn encode(payload: &str) -> String {
    form_urlencoded::byte_serialize(payload.as_bytes()).collect()
}

fn fill(pattern: &str, value: &str) -> String {
    if pattern.contains(PLACEHOLDER) {
        pattern.replacen(PLACEHOLDER, value, 1)
    } else {
        format!("{pattern}{value}")
    }
}

//! Search result items and their derived display fields.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResponseError;

const REDDIT_HOST: &str = "www.reddit.com";
const OLD_REDDIT_HOST: &str = "old.reddit.com";

/// One entry of a web search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Deserialize)]
struct SearchPayload {
    // Engines omit `items` entirely when nothing matched.
    #[serde(default)]
    items: Vec<SearchResultItem>,
}

/// Decode a serialized `{ "items": [...] }` payload, keeping array order.
pub fn decode_items(items_json: &str) -> Result<Vec<SearchResultItem>, ResponseError> {
    let payload: SearchPayload = serde_json::from_str(items_json)?;
    Ok(payload.items)
}

/// Point `www.reddit.com` links at `old.reddit.com`.
///
/// Only the exact host `www.reddit.com` is rewritten; every other link,
/// including `reddit.com` and `old.reddit.com`, is returned unchanged.
pub fn rewrite_reddit_host(link: &str) -> String {
    let Ok(mut url) = Url::parse(link) else {
        return link.to_string();
    };

    if url.host_str() != Some(REDDIT_HOST) {
        return link.to_string();
    }

    if link.contains(REDDIT_HOST) {
        return link.replacen(REDDIT_HOST, OLD_REDDIT_HOST, 1);
    }

    // Host was normalized by the parser (e.g. upper case in the input).
    match url.set_host(Some(OLD_REDDIT_HOST)) {
        Ok(()) => url.to_string(),
        Err(_) => link.to_string(),
    }
}

impl SearchResultItem {
    /// Create an item.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }

    /// The link to show and follow.
    pub fn display_link(&self) -> String {
        rewrite_reddit_host(&self.link)
    }

    /// Host followed by the percent-decoded path segments.
    ///
    /// Never empty: the first element is the host. Links without one start
    /// with their scheme, and opaque or unparseable links are kept whole.
    pub fn breadcrumb(&self) -> Vec<String> {
        let link = self.display_link();

        let url = match Url::parse(&link) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Unparseable search link '{}': {}", link, e);
                return vec![link];
            }
        };

        let first = match url.host_str().filter(|host| !host.is_empty()) {
            Some(host) => host.to_string(),
            None if url.cannot_be_a_base() => return vec![link],
            None => url.scheme().to_string(),
        };

        let mut parts = vec![first];
        if let Some(segments) = url.path_segments() {
            parts.extend(
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned()),
            );
        }
        parts
    }

    /// Breadcrumb joined for display.
    pub fn breadcrumb_text(&self) -> String {
        self.breadcrumb().join(" > ")
    }
}

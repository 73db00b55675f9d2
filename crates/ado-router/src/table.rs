//! Declarative prefix table.

use ado_core::PrefixCode;

/// Redirects built purely from a URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Shopping,
    WebSearch,
    Quote,
}

/// What a matched prefix does with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `engine.search(payload)`, rendered as search results.
    Search,

    /// `engine.query(payload)`, rendered as the returned response.
    Chat,

    /// Navigate to a URL template filled with the payload.
    Redirect(Template),

    /// `engine.lucky(hint + payload)`, then navigate.
    Lucky { hint: Option<&'static str> },

    /// `engine.find_community(payload)`, composed into the community URL.
    Community,
}

/// One `(prefix, handler)` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub code: PrefixCode,
    pub handler: Handler,
}

impl Route {
    pub const fn new(code: PrefixCode, handler: Handler) -> Self {
        Self { code, handler }
    }
}

const STANDARD_ROUTES: [Route; 8] = [
    Route::new(PrefixCode::Search, Handler::Search),
    Route::new(PrefixCode::Shopping, Handler::Redirect(Template::Shopping)),
    Route::new(PrefixCode::Chat, Handler::Chat),
    Route::new(PrefixCode::WebSearch, Handler::Redirect(Template::WebSearch)),
    Route::new(PrefixCode::Lucky, Handler::Lucky { hint: None }),
    Route::new(PrefixCode::Community, Handler::Community),
    Route::new(PrefixCode::Quote, Handler::Redirect(Template::Quote)),
    Route::new(
        PrefixCode::Encyclopedia,
        Handler::Lucky {
            hint: Some("wikipedia "),
        },
    ),
];

/// Ordered routing table. The first row whose code matches wins; codes
/// without a row fall through to the question fallback.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    routes: Vec<Route>,
}

impl PrefixTable {
    /// Table with the given rows, in order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The stable table shipped with ado.
    pub fn standard() -> Self {
        Self::new(STANDARD_ROUTES.to_vec())
    }

    /// Handler for a parsed prefix code.
    pub fn handler(&self, code: PrefixCode) -> Option<Handler> {
        self.routes
            .iter()
            .find(|route| route.code == code)
            .map(|route| route.handler)
    }

    /// Rows in order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Help listing, one line per row plus the fallback.
    pub fn usage(&self) -> String {
        let mut lines = vec!["usage: [prefix] text".to_string(), String::new()];
        for route in &self.routes {
            lines.push(format!(
                "  {} <text>  {}",
                route.code,
                route.code.description()
            ));
        }
        lines.push("  <text>    ask if it is a question, otherwise jump to the best guess".into());
        lines.join("\n")
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::standard()
    }
}

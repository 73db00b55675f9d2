//! Result area model.
//!
//! The result area is the only part of the page the renderer touches. These
//! types are platform-independent so rendering can be tested without a
//! terminal or a browser.

use std::sync::Arc;

use parking_lot::Mutex;

// =============================================================================
// Nodes
// =============================================================================

/// One block appended to the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Markdown source, converted by the area.
    Markdown(String),

    /// Verbatim text, e.g. the echoed input line.
    Text(String),

    /// A single search result.
    Card(ResultCard),

    /// A formatted failure message.
    Error(String),
}

/// Search result card.
///
/// `title` and `snippet` are HTML-escaped before they get here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub href: String,
    pub breadcrumb: String,
    pub snippet: String,
}

// =============================================================================
// Result Area
// =============================================================================

/// Container the renderer appends into.
pub trait ResultArea: Send {
    /// Append a node below the existing ones.
    fn append(&mut self, node: Node);

    /// Remove every node.
    fn clear(&mut self);

    /// Show or hide the container.
    fn set_visible(&mut self, visible: bool);
}

#[derive(Debug, Default)]
struct BufferedState {
    nodes: Vec<Node>,
    visible: bool,
}

/// In-memory result area.
///
/// Clones share the same buffer, so a caller can keep one handle for reading
/// while the renderer owns another.
#[derive(Debug, Clone, Default)]
pub struct BufferedArea {
    state: Arc<Mutex<BufferedState>>,
}

impl BufferedArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current nodes.
    pub fn nodes(&self) -> Vec<Node> {
        self.state.lock().nodes.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }
}

impl ResultArea for BufferedArea {
    fn append(&mut self, node: Node) {
        self.state.lock().nodes.push(node);
    }

    fn clear(&mut self) {
        self.state.lock().nodes.clear();
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.lock().visible = visible;
    }
}

/// Escape text for insertion into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_area_shares_state() {
        let reader = BufferedArea::new();
        let mut writer = reader.clone();

        writer.append(Node::Text("hi".to_string()));
        writer.set_visible(true);

        assert_eq!(reader.nodes(), vec![Node::Text("hi".to_string())]);
        assert!(reader.is_visible());

        writer.clear();
        assert!(reader.nodes().is_empty());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"fish" & 'chips'</b>"#),
            "&lt;b&gt;&quot;fish&quot; &amp; &#39;chips&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}

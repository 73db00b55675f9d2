//! Response Renderer.
//!
//! Turns a [`Response`] into result-area nodes. The renderer owns the result
//! area; nothing else mutates it.

use std::fmt::Display;

use ado_core::{decode_items, Response, SearchResultItem};

use crate::page::{escape_html, Node, ResultArea, ResultCard};

pub struct Renderer {
    area: Box<dyn ResultArea>,
}

impl Renderer {
    pub fn new(area: impl ResultArea + 'static) -> Self {
        Self {
            area: Box::new(area),
        }
    }

    /// Render one response.
    ///
    /// Everything except `Reset` and unrecognized payloads leaves the area
    /// visible. Unrecognized payloads are logged and otherwise ignored.
    pub fn render(&mut self, response: Response) {
        match response {
            Response::PlainText { text } | Response::MarkdownText { text } => {
                self.append(Node::Markdown(text));
            }
            Response::UsageText { text } => {
                self.append(Node::Markdown(format!("```\n{text}\n```")));
            }
            Response::SearchResults { items_json } => self.render_results(&items_json),
            Response::Reset => self.reset(),
            Response::Unrecognized { raw } => {
                tracing::warn!("Ignoring unrecognized response: {}", raw);
            }
        }
    }

    /// Show the raw input line above whatever it produces.
    pub fn echo(&mut self, raw: &str) {
        self.append(Node::Text(raw.to_string()));
    }

    /// Render a dispatch failure.
    pub fn render_error(&mut self, error: &dyn Display) {
        self.append(Node::Error(format!("Error: {error}")));
    }

    /// Drop all content without hiding the area.
    pub fn clear(&mut self) {
        self.area.clear();
    }

    /// Drop all content and hide the area.
    pub fn reset(&mut self) {
        self.area.clear();
        self.area.set_visible(false);
    }

    fn render_results(&mut self, items_json: &str) {
        match decode_items(items_json) {
            Ok(items) => {
                tracing::debug!("Rendering {} search results", items.len());
                for item in &items {
                    self.area.append(Node::Card(card(item)));
                }
                self.area.set_visible(true);
            }
            Err(e) => {
                tracing::warn!("Search payload did not decode: {}", e);
                self.render_error(&e);
            }
        }
    }

    fn append(&mut self, node: Node) {
        self.area.append(node);
        self.area.set_visible(true);
    }
}

fn card(item: &SearchResultItem) -> ResultCard {
    ResultCard {
        title: escape_html(&item.title),
        href: item.display_link(),
        breadcrumb: item.breadcrumb_text(),
        snippet: escape_html(&item.snippet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::BufferedArea;

    fn renderer() -> (Renderer, BufferedArea) {
        let area = BufferedArea::new();
        (Renderer::new(area.clone()), area)
    }

    #[test]
    fn test_plain_and_markdown_render_as_markdown() {
        let (mut renderer, area) = renderer();

        renderer.render(Response::PlainText {
            text: "hello".to_string(),
        });
        renderer.render(Response::MarkdownText {
            text: "**bold**".to_string(),
        });

        assert_eq!(
            area.nodes(),
            vec![
                Node::Markdown("hello".to_string()),
                Node::Markdown("**bold**".to_string()),
            ]
        );
        assert!(area.is_visible());
    }

    #[test]
    fn test_usage_is_fenced() {
        let (mut renderer, area) = renderer();

        renderer.render(Response::UsageText {
            text: "usage: s <text>".to_string(),
        });

        insta::assert_debug_snapshot!(area.nodes(), @r###"
        [
            Markdown(
                "```\nusage: s <text>\n```",
            ),
        ]
        "###);
    }

    #[test]
    fn test_search_results_render_cards() {
        let (mut renderer, area) = renderer();
        let json = r#"{"items":[
            {"title":"Rust <Book>","link":"https://www.reddit.com/r/rust/comments/x","snippet":"a & b"},
            {"title":"Docs","link":"https://doc.rust-lang.org/std/vec/struct.Vec.html"}
        ]}"#;

        renderer.render(Response::SearchResults {
            items_json: json.to_string(),
        });

        insta::assert_debug_snapshot!(area.nodes(), @r###"
        [
            Card(
                ResultCard {
                    title: "Rust &lt;Book&gt;",
                    href: "https://old.reddit.com/r/rust/comments/x",
                    breadcrumb: "old.reddit.com > r > rust > comments > x",
                    snippet: "a &amp; b",
                },
            ),
            Card(
                ResultCard {
                    title: "Docs",
                    href: "https://doc.rust-lang.org/std/vec/struct.Vec.html",
                    breadcrumb: "doc.rust-lang.org > std > vec > struct.Vec.html",
                    snippet: "",
                },
            ),
        ]
        "###);
        assert!(area.is_visible());
    }

    #[test]
    fn test_empty_search_results_still_show_area() {
        let (mut renderer, area) = renderer();

        renderer.render(Response::SearchResults {
            items_json: r#"{"items":[]}"#.to_string(),
        });

        assert!(area.nodes().is_empty());
        assert!(area.is_visible());
    }

    #[test]
    fn test_malformed_search_payload_renders_error() {
        let (mut renderer, area) = renderer();

        renderer.render(Response::SearchResults {
            items_json: "not json".to_string(),
        });

        let nodes = area.nodes();
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], Node::Error(m) if m.starts_with("Error: ")));
    }

    #[test]
    fn test_reset_clears_and_hides() {
        let (mut renderer, area) = renderer();
        renderer.echo("c hi");
        renderer.render(Response::PlainText {
            text: "hi".to_string(),
        });

        renderer.render(Response::Reset);

        assert!(area.nodes().is_empty());
        assert!(!area.is_visible());
    }

    #[test]
    fn test_reset_twice() {
        let (mut renderer, area) = renderer();
        renderer.echo("x");

        for _ in 0..2 {
            renderer.render(Response::Reset);
            assert!(area.nodes().is_empty());
            assert!(!area.is_visible());
        }
    }

    #[test]
    fn test_unrecognized_is_ignored() {
        let (mut renderer, area) = renderer();

        renderer.render(Response::Unrecognized {
            raw: r#"{"Shell":1}"#.to_string(),
        });

        assert!(area.nodes().is_empty());
        assert!(!area.is_visible());
    }

    #[test]
    fn test_echo_then_error() {
        let (mut renderer, area) = renderer();

        renderer.echo("c hello");
        renderer.render_error(&"quota exceeded");

        assert_eq!(
            area.nodes(),
            vec![
                Node::Text("c hello".to_string()),
                Node::Error("Error: quota exceeded".to_string()),
            ]
        );
        assert!(area.is_visible());
    }

    #[test]
    fn test_clear_keeps_visibility() {
        let (mut renderer, area) = renderer();
        renderer.echo("x");

        renderer.clear();

        assert!(area.nodes().is_empty());
        assert!(area.is_visible());
    }
}

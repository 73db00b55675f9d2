//! The tagged response union returned by chat queries.

use serde_json::Value;

use crate::error::ResponseError;

/// Result of a chat query, or a response synthesized by the router.
///
/// Engines speak a loose JSON dialect (see [`Response::from_json`]); it is
/// decoded once, at the engine boundary, into this closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Plain text, rendered as markdown unless echoed verbatim.
    PlainText { text: String },

    /// Markdown text.
    MarkdownText { text: String },

    /// Usage/help text, rendered as a fenced code block.
    UsageText { text: String },

    /// Serialized `{ "items": [...] }` search payload, decoded by the renderer.
    SearchResults { items_json: String },

    /// Clears the result area.
    Reset,

    /// Anything the decoder did not recognize. Logged, never rendered.
    Unrecognized { raw: String },
}

impl Response {
    /// Decode the engine's JSON shape.
    ///
    /// Accepted shapes:
    /// - `"Reset"`
    /// - `{ "String": "..." }`
    /// - `{ "Markdown": "..." }`
    /// - `{ "UsageString": "..." }`
    /// - `{ "SearchData": "<json>" }` or `{ "SearchData": { "json_string": "<json>" } }`
    ///
    /// Everything else becomes [`Response::Unrecognized`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if s == "Reset" => return Response::Reset,
            Value::Object(map) if map.len() == 1 => {
                if let Some(text) = map.get("String").and_then(Value::as_str) {
                    return Response::PlainText { text: text.into() };
                }
                if let Some(text) = map.get("Markdown").and_then(Value::as_str) {
                    return Response::MarkdownText { text: text.into() };
                }
                if let Some(text) = map.get("UsageString").and_then(Value::as_str) {
                    return Response::UsageText { text: text.into() };
                }
                if let Some(data) = map.get("SearchData") {
                    let items_json = match data {
                        Value::String(s) => Some(s.clone()),
                        Value::Object(inner) => inner
                            .get("json_string")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        _ => None,
                    };
                    if let Some(items_json) = items_json {
                        return Response::SearchResults { items_json };
                    }
                }
            }
            _ => {}
        }

        Response::Unrecognized {
            raw: value.to_string(),
        }
    }

    /// Decode a serialized response.
    pub fn from_json_str(json: &str) -> Result<Self, ResponseError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_json(&value))
    }

    /// Short tag name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Response::PlainText { .. } => "plain_text",
            Response::MarkdownText { .. } => "markdown_text",
            Response::UsageText { .. } => "usage_text",
            Response::SearchResults { .. } => "search_results",
            Response::Reset => "reset",
            Response::Unrecognized { .. } => "unrecognized",
        }
    }
}

//! Command line parsing.

use std::fmt;

/// A two-character action prefix: one letter followed by a space.
///
/// Matching is case-sensitive. `"s rust"` carries [`PrefixCode::Search`],
/// `"S rust"` and `"s"` carry no prefix at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixCode {
    /// `s ` - in-page web search.
    Search,
    /// `a ` - shopping site redirect.
    Shopping,
    /// `c ` - chat query rendered in the page.
    Chat,
    /// `g ` - web search engine redirect.
    WebSearch,
    /// `l ` - best-guess ("lucky") redirect.
    Lucky,
    /// `r ` - community (subreddit) redirect.
    Community,
    /// `t ` - stock quote redirect.
    Quote,
    /// `w ` - encyclopedia redirect.
    Encyclopedia,
}

impl PrefixCode {
    /// Every code, in dispatch order.
    pub const ALL: [PrefixCode; 8] = [
        PrefixCode::Search,
        PrefixCode::Shopping,
        PrefixCode::Chat,
        PrefixCode::WebSearch,
        PrefixCode::Lucky,
        PrefixCode::Community,
        PrefixCode::Quote,
        PrefixCode::Encyclopedia,
    ];

    /// The exact prefix as typed, including the trailing space.
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixCode::Search => "s ",
            PrefixCode::Shopping => "a ",
            PrefixCode::Chat => "c ",
            PrefixCode::WebSearch => "g ",
            PrefixCode::Lucky => "l ",
            PrefixCode::Community => "r ",
            PrefixCode::Quote => "t ",
            PrefixCode::Encyclopedia => "w ",
        }
    }

    /// Short human description, used in usage listings.
    pub fn description(self) -> &'static str {
        match self {
            PrefixCode::Search => "search the web and show results here",
            PrefixCode::Shopping => "search the shopping site",
            PrefixCode::Chat => "ask the answer engine",
            PrefixCode::WebSearch => "open the web search engine",
            PrefixCode::Lucky => "jump to the best guess",
            PrefixCode::Community => "open the matching subreddit",
            PrefixCode::Quote => "look up a stock quote",
            PrefixCode::Encyclopedia => "open the encyclopedia article",
        }
    }

    /// Find the code `raw` starts with, if any.
    pub fn match_prefix(raw: &str) -> Option<PrefixCode> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| raw.starts_with(code.as_str()))
    }
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().trim_end())
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The line exactly as entered.
    pub raw_text: String,

    /// Action prefix, if the line starts with one.
    pub prefix: Option<PrefixCode>,

    /// Text the action operates on: `raw_text` minus the two prefix
    /// characters, or the whole line when there is no prefix.
    pub payload: String,
}

impl Command {
    /// Parse a raw input line.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw_text = raw.into();
        let prefix = PrefixCode::match_prefix(&raw_text);

        // Prefixes are two ASCII bytes, so index 2 is always a char boundary.
        let payload = match prefix {
            Some(_) => raw_text[2..].to_string(),
            None => raw_text.clone(),
        };

        Self {
            raw_text,
            prefix,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_prefix() {
        for code in PrefixCode::ALL {
            let cmd = Command::parse(format!("{}payload here", code.as_str()));
            assert_eq!(cmd.prefix, Some(code));
            assert_eq!(cmd.payload, "payload here");
        }
    }

    #[test]
    fn test_parse_no_prefix() {
        let cmd = Command::parse("what is rust");
        assert_eq!(cmd.prefix, None);
        assert_eq!(cmd.payload, "what is rust");
        assert_eq!(cmd.raw_text, "what is rust");
    }

    #[test]
    fn test_parse_requires_trailing_space() {
        let cmd = Command::parse("s");
        assert_eq!(cmd.prefix, None);
        assert_eq!(cmd.payload, "s");

        let cmd = Command::parse("search rust");
        assert_eq!(cmd.prefix, None);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let cmd = Command::parse("S rust");
        assert_eq!(cmd.prefix, None);
        assert_eq!(cmd.payload, "S rust");
    }

    #[test]
    fn test_parse_empty_payload() {
        let cmd = Command::parse("t ");
        assert_eq!(cmd.prefix, Some(PrefixCode::Quote));
        assert_eq!(cmd.payload, "");
    }

    #[test]
    fn test_payload_keeps_extra_spaces() {
        let cmd = Command::parse("g   spaced");
        assert_eq!(cmd.prefix, Some(PrefixCode::WebSearch));
        assert_eq!(cmd.payload, "  spaced");
    }

    #[test]
    fn test_unknown_letter_is_not_a_prefix() {
        assert_eq!(PrefixCode::match_prefix("x rust"), None);
        assert_eq!(PrefixCode::match_prefix(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PrefixCode::Community.to_string(), "r");
    }
}

//! Cheap question detection.

const OPENERS: &[&str] = &[
    "how ", "how's ", "does ", "is ", "what ", "what's", "whats", "why ", "which ", "can ", "if ",
    "are there", "where ", "when ", "are ", "will ", "should ", "could ", "would ", "do ", "have ",
    "has ", "who ", "explain ", "tell me ",
];

const INFIXES: &[&str] = &[
    " is it ",
    " how to ",
    " do you ",
    " can you ",
    " could you ",
    " would you ",
    " should I ",
];

/// True when `text` reads like a natural-language question.
///
/// Matching is exact: case and surrounding whitespace count.
pub fn looks_like_question(text: &str) -> bool {
    OPENERS.iter().any(|o| text.starts_with(o))
        || INFIXES.iter().any(|i| text.contains(i))
        || text.ends_with('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openers() {
        assert!(looks_like_question("how do lifetimes work"));
        assert!(looks_like_question("what's the weather"));
        assert!(looks_like_question("explain borrowing"));
        assert!(looks_like_question("tell me a joke"));
    }

    #[test]
    fn test_infixes_and_question_mark() {
        assert!(looks_like_question("rust: how to sort a vec"));
        assert!(looks_like_question("hey can you help"));
        assert!(looks_like_question("tokio vs async-std?"));
        assert!(looks_like_question("so should I learn rust"));
    }

    #[test]
    fn test_matching_is_exact() {
        assert!(!looks_like_question("What's the weather"));
        assert!(!looks_like_question("  explain borrowing"));
        assert!(!looks_like_question("tokio vs async-std? "));
        assert!(!looks_like_question("so should i learn rust"));
    }

    #[test]
    fn test_not_questions() {
        assert!(!looks_like_question("rust ownership"));
        assert!(!looks_like_question("github"));
        assert!(!looks_like_question("history of rome"));
        assert!(!looks_like_question(""));
    }
}

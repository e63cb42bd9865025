//! Support/troubleshooting query flagging.
//!
//! Boolean detector for troubleshooting language, case-insensitive,
//! substring-based. Pure and total over all string inputs.

/// Troubleshooting language markers. Superset of the funnel's retention
/// keywords: the support flag also counts explicit "support" requests.
const SUPPORT_KEYWORDS: &[&str] = &[
    "reset",
    "error",
    "fix",
    "help",
    "forgot",
    "issue",
    "problem",
    "trouble",
    "broken",
    "not working",
    "support",
];

/// True if the query appears to be a support/troubleshooting request.
pub fn is_support(query: &str) -> bool {
    if query.is_empty() {
        return false;
    }

    let q = query.to_lowercase();
    SUPPORT_KEYWORDS.iter().any(|kw| q.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_detection() {
        for query in [
            "I need help with an error",
            "How do I reset my password?",
            "Something is broken",
            "I'm having trouble with this",
            "Support request",
        ] {
            assert!(is_support(query), "Expected support flag for '{}'", query);
        }
    }

    #[test]
    fn test_non_support_detection() {
        for query in ["How to use this feature?", "What is the price?", "Hello there"] {
            assert!(!is_support(query), "Unexpected support flag for '{}'", query);
        }
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(!is_support(""));
        assert!(!is_support("   "));
    }
}

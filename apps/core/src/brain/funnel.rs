//! Funnel stage derivation from (query, intent).
//!
//! Maps each classified query onto a customer-journey stage. The cascade
//! below is ordered and total: every (query, intent) pair yields exactly
//! one stage, and earlier checks win.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::intent::Intent;

/// Customer-journey funnel stage. Closed enumeration; derived, never
/// chosen independently of the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelStage {
    Awareness,
    Consideration,
    Decision,
    Retention,
}

impl FunnelStage {
    /// All variants, in the order histograms are reported.
    pub const ALL: [FunnelStage; 4] = [
        FunnelStage::Awareness,
        FunnelStage::Consideration,
        FunnelStage::Decision,
        FunnelStage::Retention,
    ];

    /// Returns the dataset label for the stage.
    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Awareness => "awareness",
            FunnelStage::Consideration => "consideration",
            FunnelStage::Decision => "decision",
            FunnelStage::Retention => "retention",
        }
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Troubleshooting language that pulls a query into retention. This list
/// is the funnel's own; unlike the support flagger it does not include
/// "support" itself.
const RETENTION_KEYWORDS: &[&str] = &[
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
];

/// Comparison or feature-research language.
const COMPARISON_KEYWORDS: &[&str] = &[
    " vs ",
    "compare",
    "pros",
    "cons",
    "features",
    "difference",
    "better",
    "best",
    "alternative",
    "review",
    "recommendation",
];

/// Derive the funnel stage for a query and its classified intent.
///
/// Total over all inputs; an empty query is awareness regardless of
/// intent.
pub fn classify_funnel(query: &str, intent: Intent) -> FunnelStage {
    if query.is_empty() {
        return FunnelStage::Awareness;
    }

    let q = query.to_lowercase();

    // Decision: any commercial intent.
    if intent == Intent::Commercial {
        return FunnelStage::Decision;
    }

    // Retention: navigational intent or troubleshooting keywords.
    if intent == Intent::Navigational {
        return FunnelStage::Retention;
    }
    if RETENTION_KEYWORDS.iter().any(|kw| q.contains(kw)) {
        return FunnelStage::Retention;
    }

    // Consideration: comparison or feature research.
    if COMPARISON_KEYWORDS.iter().any(|kw| q.contains(kw)) {
        return FunnelStage::Consideration;
    }

    // Awareness: informational and educational queries, and the default.
    if matches!(intent, Intent::Informational | Intent::EducationalQuiz) {
        return FunnelStage::Awareness;
    }

    FunnelStage::Awareness
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_stage() {
        assert_eq!(
            classify_funnel("I want to buy this", Intent::Commercial),
            FunnelStage::Decision
        );
    }

    #[test]
    fn test_retention_stage() {
        // Navigational intent.
        assert_eq!(
            classify_funnel("Go to my account", Intent::Navigational),
            FunnelStage::Retention
        );

        // Troubleshooting keywords with any intent.
        assert_eq!(
            classify_funnel("I need help with an error", Intent::Other),
            FunnelStage::Retention
        );
    }

    #[test]
    fn test_consideration_stage() {
        for query in [
            "Compare these options",
            "What are the pros and cons?",
            "Which is better?",
            "Show me alternatives",
        ] {
            assert_eq!(
                classify_funnel(query, Intent::Other),
                FunnelStage::Consideration,
                "Expected Consideration for '{}'",
                query
            );
        }
    }

    #[test]
    fn test_awareness_stage() {
        assert_eq!(
            classify_funnel("What is this?", Intent::Informational),
            FunnelStage::Awareness
        );
        assert_eq!(
            classify_funnel("Explain this concept", Intent::EducationalQuiz),
            FunnelStage::Awareness
        );
        // Default for anything else.
        assert_eq!(
            classify_funnel("Good morning", Intent::Other),
            FunnelStage::Awareness
        );
    }

    #[test]
    fn test_empty_query_is_awareness() {
        assert_eq!(classify_funnel("", Intent::Commercial), FunnelStage::Awareness);
        assert_eq!(classify_funnel("", Intent::Other), FunnelStage::Awareness);
    }

    #[test]
    fn test_retention_wins_over_comparison() {
        // "broken" (retention) and "compare" (consideration) both match;
        // the retention check runs first.
        assert_eq!(
            classify_funnel("compare fixes for my broken build", Intent::Other),
            FunnelStage::Retention
        );
    }
}

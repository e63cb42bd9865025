//! Query Analyzer - orchestrator for the brain module.
//!
//! Runs the four rule-based classifiers over one user message and bundles
//! the results. Construct once per run; classification itself is pure.

use super::brands::BrandMatcher;
use super::funnel::{classify_funnel, FunnelStage};
use super::intent::{Intent, IntentClassifier};
use super::support::is_support;

/// Per-query classification outcome, before session metadata is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryAnalysis {
    /// Classified intent category.
    pub intent: Intent,
    /// Funnel stage derived from (query, intent).
    pub funnel_stage: FunnelStage,
    /// Canonical brand name, if any brand is mentioned.
    pub brand: Option<&'static str>,
    /// Whether the query reads as a support request.
    pub is_support: bool,
}

/// Analyzer owning the classifier instances.
pub struct QueryAnalyzer {
    intent_classifier: IntentClassifier,
    brand_matcher: BrandMatcher,
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryAnalyzer {
    /// Create a new analyzer with all rule tables built.
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
            brand_matcher: BrandMatcher::new(),
        }
    }

    /// Classify a single user query. Total over all string inputs.
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let intent = self.intent_classifier.classify(query);
        let funnel_stage = classify_funnel(query, intent);
        let brand = self.brand_matcher.find(query);
        let support = is_support(query);

        QueryAnalysis {
            intent,
            funnel_stage,
            brand,
            is_support: support,
        }
    }
}

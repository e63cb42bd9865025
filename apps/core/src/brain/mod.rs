//! # Brain Module
//!
//! Fast, rule-based classification system for QueryLens.
//! Every user message goes through these classifiers exactly once.
//!
//! ## Components
//! - `intent`: Intent classification using an ordered keyword/regex cascade
//! - `funnel`: Funnel stage derivation from (query, intent)
//! - `brands`: Brand mention detection, longest-match-first
//! - `support`: Support/troubleshooting flagging
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod brands;
pub mod funnel;
pub mod intent;
pub mod support;

// Re-export main types for convenience
pub use analyzer::{QueryAnalysis, QueryAnalyzer};
pub use brands::BrandMatcher;
pub use funnel::{classify_funnel, FunnelStage};
pub use intent::{Intent, IntentClassifier};
pub use support::is_support;

//! Intent Classification using keyword and regex rules.
//!
//! Fast rule-based intent detection for user queries.
//! No ML model required - pure keyword containment and regex matching.
//!
//! Rules are evaluated in a fixed priority order with first-match-wins
//! semantics. A query like "how do I cancel my subscription" satisfies both
//! the commercial and informational rule groups; the cascade order decides,
//! so the order is part of the contract, not an implementation detail.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Detected intent category. Closed enumeration; exactly one per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Purchase/pricing language (buy, price, subscription, etc.)
    #[serde(rename = "commercial")]
    Commercial,
    /// Text rework requests (rewrite, summarize, proofread, etc.)
    #[serde(rename = "paraphrase/edit")]
    ParaphraseEdit,
    /// Quiz-style or definitional questions (which of the following, etc.)
    #[serde(rename = "educational/quiz")]
    EducationalQuiz,
    /// Open informational questions (how to, what is, etc.)
    #[serde(rename = "informational")]
    Informational,
    /// Finding a specific site/page (login, dashboard, settings, etc.)
    #[serde(rename = "navigational")]
    Navigational,
    /// Fallback when no rule group matches.
    #[serde(rename = "other")]
    Other,
}

impl Intent {
    /// All variants, in the order histograms are reported.
    pub const ALL: [Intent; 6] = [
        Intent::Commercial,
        Intent::ParaphraseEdit,
        Intent::EducationalQuiz,
        Intent::Informational,
        Intent::Navigational,
        Intent::Other,
    ];

    /// Returns the dataset label for the intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Commercial => "commercial",
            Intent::ParaphraseEdit => "paraphrase/edit",
            Intent::EducationalQuiz => "educational/quiz",
            Intent::Informational => "informational",
            Intent::Navigational => "navigational",
            Intent::Other => "other",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Navigational: finding a specific site/page.
const NAVIGATIONAL_KEYWORDS: &[&str] = &[
    "go to", "open", "find my", "login", "log in", "dashboard", "account", "settings", "profile",
];

const COMMERCIAL_KEYWORDS: &[&str] = &[
    "buy",
    "purchase",
    "price",
    "discount",
    "deal",
    "cost",
    "subscription",
    "pricing",
    "upgrade",
    "license",
];

const PARAPHRASE_KEYWORDS: &[&str] = &[
    "reword",
    "rewrite",
    "paraphrase",
    "summarize",
    "edit",
    "improve",
    "make it better",
    "proofread",
    "check grammar",
    "translate",
];

// Compile patterns once at startup. expect() is acceptable here: a broken
// pattern is an unrecoverable programming error caught by the test suite.
static QUIZ_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b[abcd]\.").expect("Invalid regex: answer option pattern"),
        Regex::new(r"(?i)select the correct answer").expect("Invalid regex: correct answer"),
        Regex::new(r"(?i)which of the following").expect("Invalid regex: which of the following"),
        Regex::new(r"(?i)what is.*called").expect("Invalid regex: what is called"),
        Regex::new(r"(?i)definition of").expect("Invalid regex: definition of"),
        Regex::new(r"(?i)what does.*mean").expect("Invalid regex: what does mean"),
        Regex::new(r"(?i)explain.*concept").expect("Invalid regex: explain concept"),
        Regex::new(r"(?i)how does.*work").expect("Invalid regex: how does work"),
        Regex::new(r"(?i)what is the difference between")
            .expect("Invalid regex: difference between"),
    ]
});

static INFO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)^(how to|how do|how does)\s+").expect("Invalid regex: how patterns"),
        Regex::new(r"(?i)^(what is|what are|what was|what were)\s+")
            .expect("Invalid regex: what patterns"),
        Regex::new(r"(?i)^(who is|who are)\s+").expect("Invalid regex: who patterns"),
        Regex::new(r"(?i)^why\s+").expect("Invalid regex: why pattern"),
        Regex::new(r"(?i)^where\s+").expect("Invalid regex: where pattern"),
        Regex::new(r"(?i)^when\s+").expect("Invalid regex: when pattern"),
        Regex::new(r"(?i)^can you\s+").expect("Invalid regex: can you pattern"),
        Regex::new(r"(?i)^(tell me|give me|show me) about").expect("Invalid regex: about pattern"),
    ]
});

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| query.contains(kw))
}

fn matches_navigational(query: &str) -> bool {
    contains_any(query, NAVIGATIONAL_KEYWORDS)
}

fn matches_commercial(query: &str) -> bool {
    contains_any(query, COMMERCIAL_KEYWORDS)
}

fn matches_paraphrase(query: &str) -> bool {
    contains_any(query, PARAPHRASE_KEYWORDS)
}

fn matches_quiz(query: &str) -> bool {
    QUIZ_PATTERNS.iter().any(|p| p.is_match(query))
}

fn matches_informational(query: &str) -> bool {
    INFO_PATTERNS.iter().any(|p| p.is_match(query))
}

/// One entry of the rule cascade: predicate plus the intent it assigns.
struct IntentRule {
    intent: Intent,
    matches: fn(&str) -> bool,
}

/// Intent classifier evaluating an ordered rule cascade.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier with the full rule cascade.
    ///
    /// The order below is the priority order.
    pub fn new() -> Self {
        let rules = vec![
            IntentRule {
                intent: Intent::Navigational,
                matches: matches_navigational,
            },
            IntentRule {
                intent: Intent::Commercial,
                matches: matches_commercial,
            },
            IntentRule {
                intent: Intent::ParaphraseEdit,
                matches: matches_paraphrase,
            },
            IntentRule {
                intent: Intent::EducationalQuiz,
                matches: matches_quiz,
            },
            IntentRule {
                intent: Intent::Informational,
                matches: matches_informational,
            },
        ];

        Self { rules }
    }

    /// Classify the intent of a query. Total over all string inputs;
    /// empty or whitespace-only input yields [`Intent::Other`].
    pub fn classify(&self, query: &str) -> Intent {
        let q = query.trim().to_lowercase();

        if q.is_empty() {
            return Intent::Other;
        }

        for rule in &self.rules {
            if (rule.matches)(&q) {
                return rule.intent;
            }
        }

        Intent::Other
    }
}

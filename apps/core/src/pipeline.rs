//! Sampler/Aggregator - the sequential processing core.
//!
//! Consumes one chunk of sessions at a time, classifies every user
//! message, updates the run-wide accumulator unconditionally, and keeps a
//! Bernoulli sample of classified queries. Strictly single-threaded: the
//! accumulator and sample buffer are owned by the one processing path, so
//! no locking exists anywhere in the pipeline.
//!
//! Determinism: exactly one RNG draw per user message, in input order.
//! Given a fixed seed, fraction, and input, the retained sample is
//! byte-for-byte reproducible regardless of chunk layout.

use std::collections::HashMap;

use rand::Rng;

use crate::brain::{FunnelStage, Intent, QueryAnalysis, QueryAnalyzer};
use crate::models::{ClassifiedQuery, Role, SessionRecord};

/// Brand bucket used when no brand is mentioned.
pub const NO_BRAND: &str = "none";

/// Run-wide counters and distributions. Created at run start, mutated
/// once per session/message, finalized read-only into the summary.
#[derive(Debug, Default)]
pub struct RunAccumulator {
    /// Sessions successfully parsed and processed.
    pub total_sessions: u64,
    /// User messages classified (sampled or not).
    pub total_queries: u64,
    /// Queries flagged as support requests.
    pub support_queries: u64,
    intent_counts: HashMap<Intent, u64>,
    funnel_counts: HashMap<FunnelStage, u64>,
    brand_counts: HashMap<String, u64>,
    session_lengths: Vec<u64>,
    user_message_counts: Vec<u64>,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_session(&mut self, session_length: u64, user_messages: u64) {
        self.total_sessions += 1;
        self.session_lengths.push(session_length);
        self.user_message_counts.push(user_messages);
    }

    fn record_query(&mut self, analysis: &QueryAnalysis) {
        self.total_queries += 1;
        *self.intent_counts.entry(analysis.intent).or_insert(0) += 1;
        *self
            .funnel_counts
            .entry(analysis.funnel_stage)
            .or_insert(0) += 1;
        let brand = analysis.brand.unwrap_or(NO_BRAND);
        *self.brand_counts.entry(brand.to_string()).or_insert(0) += 1;
        if analysis.is_support {
            self.support_queries += 1;
        }
    }

    /// Count for one intent bucket.
    pub fn intent_count(&self, intent: Intent) -> u64 {
        self.intent_counts.get(&intent).copied().unwrap_or(0)
    }

    /// Count for one funnel bucket.
    pub fn funnel_count(&self, stage: FunnelStage) -> u64 {
        self.funnel_counts.get(&stage).copied().unwrap_or(0)
    }

    /// Brand mention histogram, including the "none" bucket.
    pub fn brand_counts(&self) -> &HashMap<String, u64> {
        &self.brand_counts
    }

    /// Per-session total message counts, in input order.
    pub fn session_lengths(&self) -> &[u64] {
        &self.session_lengths
    }

    /// Per-session user message counts, in input order.
    pub fn user_message_counts(&self) -> &[u64] {
        &self.user_message_counts
    }
}

/// Per-chunk progress numbers for logging.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChunkStats {
    pub sessions: u64,
    pub user_messages: u64,
    pub sampled: u64,
}

/// Process one chunk of sessions in input order.
///
/// Every user message is classified and counted; sampling is an
/// independent Bernoulli trial per message with probability
/// `sample_fraction`, drawn from the injected `rng`. Session-level fields
/// are computed once per session and attached to every sampled query from
/// that session.
pub fn process_chunk(
    analyzer: &QueryAnalyzer,
    chunk: &[SessionRecord],
    accumulator: &mut RunAccumulator,
    samples: &mut Vec<ClassifiedQuery>,
    sample_fraction: f64,
    rng: &mut impl Rng,
) -> ChunkStats {
    let mut stats = ChunkStats::default();

    for session in chunk {
        let session_length = session.messages.len() as u64;
        let num_user_messages = session.user_message_count();
        accumulator.record_session(session_length, num_user_messages);
        stats.sessions += 1;

        for message in &session.messages {
            if message.role != Role::User {
                continue;
            }

            let analysis = analyzer.analyze(&message.content);
            accumulator.record_query(&analysis);
            stats.user_messages += 1;

            // One draw per user message, sampled or not, so the draw
            // sequence is a pure function of the traversal order.
            if rng.gen::<f64>() < sample_fraction {
                samples.push(ClassifiedQuery {
                    session_id: session.id.clone(),
                    query: message.content.clone(),
                    intent: analysis.intent,
                    funnel_stage: analysis.funnel_stage,
                    brand_mentioned: analysis.brand.unwrap_or(NO_BRAND).to_string(),
                    is_support: analysis.is_support,
                    session_length,
                    num_user_messages,
                });
                stats.sampled += 1;
            }
        }
    }

    stats
}

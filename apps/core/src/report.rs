//! End-of-run reporting.
//!
//! Turns the accumulator into a serializable [`RunSummary`], writes the
//! summary as pretty JSON, and persists the sampled queries as a columnar
//! Arrow IPC file. Everything here is write-once at end of run.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::brain::{FunnelStage, Intent};
use crate::error::AppError;
use crate::models::ClassifiedQuery;
use crate::pipeline::RunAccumulator;

/// Number of brand buckets retained in the summary.
const TOP_BRANDS: usize = 20;

/// One histogram bucket with its share of all queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: u64,
    pub percentage: f64,
}

/// One brand bucket. The "none" bucket participates like any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: u64,
}

/// Session-level distribution statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub avg_session_length: f64,
    pub median_session_length: f64,
    pub avg_user_messages_per_session: f64,
    pub median_user_messages_per_session: f64,
}

/// The aggregate statistical summary persisted at end of run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_sessions: u64,
    pub total_queries: u64,
    pub intent_breakdown: Vec<CategoryBreakdown>,
    pub funnel_breakdown: Vec<CategoryBreakdown>,
    pub brand_breakdown: Vec<BrandCount>,
    pub support_count: u64,
    pub support_percentage: f64,
    pub session_metrics: SessionMetrics,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Finalize the accumulator into a read-only summary.
///
/// Histogram buckets appear in fixed enum order; brand buckets are sorted
/// by count descending with name as the tie-break, truncated to the top
/// twenty.
pub fn build_summary(accumulator: &RunAccumulator) -> RunSummary {
    let total = accumulator.total_queries;

    let intent_breakdown = Intent::ALL
        .iter()
        .map(|intent| {
            let count = accumulator.intent_count(*intent);
            CategoryBreakdown {
                category: intent.label().to_string(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    let funnel_breakdown = FunnelStage::ALL
        .iter()
        .map(|stage| {
            let count = accumulator.funnel_count(*stage);
            CategoryBreakdown {
                category: stage.label().to_string(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    let mut brand_breakdown: Vec<BrandCount> = accumulator
        .brand_counts()
        .iter()
        .map(|(brand, count)| BrandCount {
            brand: brand.clone(),
            count: *count,
        })
        .collect();
    brand_breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.brand.cmp(&b.brand)));
    brand_breakdown.truncate(TOP_BRANDS);

    RunSummary {
        total_sessions: accumulator.total_sessions,
        total_queries: total,
        intent_breakdown,
        funnel_breakdown,
        brand_breakdown,
        support_count: accumulator.support_queries,
        support_percentage: percentage(accumulator.support_queries, total),
        session_metrics: SessionMetrics {
            avg_session_length: mean(accumulator.session_lengths()),
            median_session_length: median(accumulator.session_lengths()),
            avg_user_messages_per_session: mean(accumulator.user_message_counts()),
            median_user_messages_per_session: median(accumulator.user_message_counts()),
        },
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

fn sample_schema() -> Schema {
    Schema::new(vec![
        Field::new("session_id", DataType::Utf8, false),
        Field::new("query", DataType::Utf8, false),
        Field::new("intent", DataType::Utf8, false),
        Field::new("funnel_stage", DataType::Utf8, false),
        Field::new("brand_mentioned", DataType::Utf8, false),
        Field::new("is_support", DataType::Boolean, false),
        Field::new("session_length", DataType::UInt64, false),
        Field::new("num_user_messages", DataType::UInt64, false),
    ])
}

/// Write the sampled queries as a single-batch Arrow IPC file.
///
/// An empty sample still produces a valid zero-row file.
pub fn write_samples(path: &Path, samples: &[ClassifiedQuery]) -> Result<(), AppError> {
    let schema = Arc::new(sample_schema());

    let session_ids: Vec<&str> = samples.iter().map(|q| q.session_id.as_str()).collect();
    let queries: Vec<&str> = samples.iter().map(|q| q.query.as_str()).collect();
    let intents: Vec<&str> = samples.iter().map(|q| q.intent.label()).collect();
    let stages: Vec<&str> = samples.iter().map(|q| q.funnel_stage.label()).collect();
    let brands: Vec<&str> = samples.iter().map(|q| q.brand_mentioned.as_str()).collect();
    let support: Vec<bool> = samples.iter().map(|q| q.is_support).collect();
    let lengths: Vec<u64> = samples.iter().map(|q| q.session_length).collect();
    let user_counts: Vec<u64> = samples.iter().map(|q| q.num_user_messages).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(session_ids)),
        Arc::new(StringArray::from(queries)),
        Arc::new(StringArray::from(intents)),
        Arc::new(StringArray::from(stages)),
        Arc::new(StringArray::from(brands)),
        Arc::new(BooleanArray::from(support)),
        Arc::new(UInt64Array::from(lengths)),
        Arc::new(UInt64Array::from(user_counts)),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(file, &schema)?;
    writer.write(&batch)?;
    writer.finish()?;
    Ok(())
}

/// Log the first few sampled classifications, mirroring the dataset
/// preview of the original analysis runs.
pub fn log_sample_preview(samples: &[ClassifiedQuery]) {
    if samples.is_empty() {
        return;
    }

    info!("Sample queries (first {}):", samples.len().min(5));
    for query in samples.iter().take(5) {
        let preview: String = query.query.chars().take(100).collect();
        info!(
            "  [{}] intent={} funnel={} brand={} support={} \"{}\"",
            query.session_id,
            query.intent,
            query.funnel_stage,
            query.brand_mentioned,
            query.is_support,
            preview
        );
    }
}

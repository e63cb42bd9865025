//! Reporter Tests
//!
//! Summary math over a known fixture, plus the JSON and Arrow writers.

use std::fs::File;

use arrow::array::StringArray;
use arrow::ipc::reader::FileReader;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::brain::QueryAnalyzer;
use crate::models::{ChatMessage, ClassifiedQuery, Role, SessionRecord};
use crate::pipeline::{process_chunk, RunAccumulator};
use crate::report::{build_summary, write_samples, write_summary, RunSummary};

fn user(content: &str) -> ChatMessage {
    ChatMessage {
        role: Role::User,
        content: content.to_string(),
    }
}

fn assistant(content: &str) -> ChatMessage {
    ChatMessage {
        role: Role::Assistant,
        content: content.to_string(),
    }
}

/// Same shape as the pipeline fixture: 4 sessions, 6 user queries,
/// one support query, one Netflix mention.
fn fixture_accumulator() -> (RunAccumulator, Vec<ClassifiedQuery>) {
    let sessions = vec![
        SessionRecord {
            id: "s1".to_string(),
            messages: vec![
                user("How do I buy a subscription?"),
                assistant("Here is how."),
                user("thanks"),
            ],
        },
        SessionRecord {
            id: "s2".to_string(),
            messages: vec![user("My Netflix account is not working"), assistant("Sorry!")],
        },
        SessionRecord {
            id: "s3".to_string(),
            messages: vec![assistant("unsolicited greeting")],
        },
        SessionRecord {
            id: "s4".to_string(),
            messages: vec![
                user("compare Notion and Airtable"),
                user("what is a wiki"),
                user("go to settings"),
            ],
        },
    ];

    let analyzer = QueryAnalyzer::new();
    let mut accumulator = RunAccumulator::new();
    let mut samples = Vec::new();
    let mut rng = StdRng::seed_from_u64(42);
    process_chunk(&analyzer, &sessions, &mut accumulator, &mut samples, 1.0, &mut rng);
    (accumulator, samples)
}

#[test]
fn test_summary_totals_and_percentages() {
    let (accumulator, _) = fixture_accumulator();
    let summary = build_summary(&accumulator);

    assert_eq!(summary.total_sessions, 4);
    assert_eq!(summary.total_queries, 6);

    let commercial = summary
        .intent_breakdown
        .iter()
        .find(|b| b.category == "commercial")
        .unwrap();
    assert_eq!(commercial.count, 1);
    assert_eq!(commercial.percentage, 16.67);

    let navigational = summary
        .intent_breakdown
        .iter()
        .find(|b| b.category == "navigational")
        .unwrap();
    // "My Netflix account..." and "go to settings" both hit the
    // navigational keyword group.
    assert_eq!(navigational.count, 2);
    assert_eq!(navigational.percentage, 33.33);

    let retention = summary
        .funnel_breakdown
        .iter()
        .find(|b| b.category == "retention")
        .unwrap();
    assert_eq!(retention.count, 2);

    assert_eq!(summary.support_count, 1);
    assert_eq!(summary.support_percentage, 16.67);
}

#[test]
fn test_summary_histograms_sum_to_totals() {
    let (accumulator, _) = fixture_accumulator();
    let summary = build_summary(&accumulator);

    let intent_sum: u64 = summary.intent_breakdown.iter().map(|b| b.count).sum();
    let funnel_sum: u64 = summary.funnel_breakdown.iter().map(|b| b.count).sum();
    assert_eq!(intent_sum, summary.total_queries);
    assert_eq!(funnel_sum, summary.total_queries);
}

#[test]
fn test_session_metrics() {
    let (accumulator, _) = fixture_accumulator();
    let summary = build_summary(&accumulator);

    // Lengths 3, 2, 1, 3 and user counts 2, 1, 0, 3.
    assert_eq!(summary.session_metrics.avg_session_length, 2.25);
    assert_eq!(summary.session_metrics.median_session_length, 2.5);
    assert_eq!(summary.session_metrics.avg_user_messages_per_session, 1.5);
    assert_eq!(summary.session_metrics.median_user_messages_per_session, 1.5);
}

#[test]
fn test_brand_breakdown_ordering() {
    let (accumulator, _) = fixture_accumulator();
    let summary = build_summary(&accumulator);

    // "none" dominates, then the single branded mentions sorted by name.
    assert_eq!(summary.brand_breakdown[0].brand, "none");
    assert_eq!(summary.brand_breakdown[0].count, 4);
    let brands: Vec<&str> = summary.brand_breakdown[1..]
        .iter()
        .map(|b| b.brand.as_str())
        .collect();
    assert_eq!(brands, vec!["Airtable", "Netflix"]);
}

#[test]
fn test_empty_run_summary_is_all_zeros() {
    let accumulator = RunAccumulator::new();
    let summary = build_summary(&accumulator);

    assert_eq!(summary.total_queries, 0);
    assert!(summary.intent_breakdown.iter().all(|b| b.count == 0 && b.percentage == 0.0));
    assert!(summary.brand_breakdown.is_empty());
    assert_eq!(summary.session_metrics.median_session_length, 0.0);
}

#[test]
fn test_summary_json_round_trip() {
    let (accumulator, _) = fixture_accumulator();
    let summary = build_summary(&accumulator);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline_summary.json");
    write_summary(&path, &summary).unwrap();

    let parsed: RunSummary =
        serde_json::from_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(parsed, summary);
}

#[test]
fn test_samples_arrow_file_round_trip() {
    let (_, samples) = fixture_accumulator();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sampled_queries.arrow");
    write_samples(&path, &samples).unwrap();

    let reader = FileReader::try_new(File::open(&path).unwrap(), None).unwrap();
    let batches: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, samples.len());

    let ids = batches[0]
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(ids.value(0), "s1");
}

#[test]
fn test_empty_sample_writes_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sampled_queries.arrow");
    write_samples(&path, &[]).unwrap();

    let reader = FileReader::try_new(File::open(&path).unwrap(), None).unwrap();
    let rows: usize = reader
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
        .iter()
        .map(|b| b.num_rows())
        .sum();
    assert_eq!(rows, 0);
}

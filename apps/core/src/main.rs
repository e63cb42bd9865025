// QueryLens Pipeline Entry Point
// Classifies chat session queries by intent, funnel stage, brand and
// support signals, and writes a sampled dataset plus a run summary.

mod brain;
mod config;
mod error;
mod models;
mod pipeline;
mod reader;
mod report;
mod run_logger;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use brain::QueryAnalyzer;
use config::PipelineConfig;
use error::AppError;
use pipeline::{process_chunk, RunAccumulator};
use reader::SessionReader;
use run_logger::RunLogger;

#[derive(Parser, Debug)]
#[command(name = "querylens")]
#[command(about = "Classify and sample chat session queries", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the JSONL session dump
    #[arg(short, long)]
    input: PathBuf,

    /// Maximum sessions held in memory per chunk
    #[arg(long, default_value_t = config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Per-query retention probability, in [0, 1]
    #[arg(long, default_value_t = config::DEFAULT_SAMPLE_FRACTION)]
    sample_fraction: f64,

    /// Process only the first chunk and stop
    #[arg(long)]
    smoke_test: bool,

    /// Seed for the sampling RNG
    #[arg(long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Directory receiving the sampled dataset and the summary
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Directory receiving the run log
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input_path: cli.input,
            chunk_size: cli.chunk_size,
            sample_fraction: cli.sample_fraction,
            smoke_test: cli.smoke_test,
            seed: cli.seed,
            output_dir: cli.output_dir,
            log_dir: cli.log_dir,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PipelineConfig::from(Cli::parse());
    config.ensure_valid()?;

    let mut run_log = RunLogger::start_run(&config.log_dir);
    match run(&config, &mut run_log) {
        Ok(()) => {
            run_log.complete_run(true);
            Ok(())
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            run_log.log_error(&e.to_string());
            run_log.complete_run(false);
            Err(e.into())
        }
    }
}

fn run(config: &PipelineConfig, run_log: &mut RunLogger) -> Result<(), AppError> {
    info!("Starting pipeline");
    info!("Reading from: {}", config.input_path.display());
    info!("Chunk size: {}", config.chunk_size);
    info!("Sample fraction: {}%", config.sample_fraction * 100.0);
    info!("Smoke test mode: {}", config.smoke_test);

    let analyzer = QueryAnalyzer::new();
    let mut reader = SessionReader::open(&config.input_path, config.chunk_size)?;
    let mut accumulator = RunAccumulator::new();
    let mut samples = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut chunk_index = 0u64;
    while let Some(chunk) = reader.next_chunk()? {
        chunk_index += 1;
        let stats = process_chunk(
            &analyzer,
            &chunk,
            &mut accumulator,
            &mut samples,
            config.sample_fraction,
            &mut rng,
        );
        let progress = format!(
            "chunk {}: sessions={}, user_msgs={}, sampled={}",
            chunk_index, stats.sessions, stats.user_messages, stats.sampled
        );
        info!("{}", progress);
        run_log.log_info(&progress);

        if config.smoke_test {
            info!("Smoke test mode: stopping after first chunk");
            break;
        }
    }

    if reader.skipped_lines() > 0 {
        let note = format!(
            "skipped {} malformed lines out of {}",
            reader.skipped_lines(),
            reader.lines_read()
        );
        info!("{}", note);
        run_log.log_info(&note);
    }

    info!("Total sessions scanned: {}", accumulator.total_sessions);
    info!("Total user queries classified: {}", accumulator.total_queries);
    info!("Queries sampled: {}", samples.len());
    report::log_sample_preview(&samples);

    let summary = report::build_summary(&accumulator);
    report::write_samples(&config.samples_path(), &samples)?;
    info!("Written {}", config.samples_path().display());
    report::write_summary(&config.summary_path(), &summary)?;
    info!("Written {}", config.summary_path().display());

    run_log.log_info(&format!(
        "processed {} sessions, {} queries, {} sampled",
        accumulator.total_sessions,
        accumulator.total_queries,
        samples.len()
    ));

    Ok(())
}

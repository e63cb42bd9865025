//! Pipeline configuration.
//!
//! Populated from the CLI surface and validated before any processing
//! begins; a bad configuration never reaches the reader.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.01;
pub const DEFAULT_SEED: u64 = 42;

/// Full configuration surface consumed by the pipeline core.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    /// Path to the JSONL session dump.
    pub input_path: PathBuf,
    /// Maximum sessions held in memory per chunk. Bounds peak memory;
    /// has no effect on the aggregated statistics.
    #[validate(range(min = 1))]
    pub chunk_size: usize,
    /// Per-query retention probability. Zero is legal and produces an
    /// empty sample with intact counters.
    #[validate(range(min = 0.0, max = 1.0))]
    pub sample_fraction: f64,
    /// Process only the first chunk, for quick verification runs.
    pub smoke_test: bool,
    /// Seed for the sampling RNG; fixed seed means reproducible samples.
    pub seed: u64,
    /// Directory receiving the sampled dataset and the summary.
    pub output_dir: PathBuf,
    /// Directory receiving the run log.
    pub log_dir: PathBuf,
}

impl PipelineConfig {
    /// Validate ranges and input readability. Called once at startup;
    /// any failure here is fatal before processing starts.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate()?;

        File::open(&self.input_path).map_err(|e| {
            AppError::Config(format!(
                "Cannot read input file {}: {}",
                self.input_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Destination of the sampled-query dataset.
    pub fn samples_path(&self) -> PathBuf {
        self.output_dir.join("sampled_queries.arrow")
    }

    /// Destination of the aggregate summary.
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("pipeline_summary.json")
    }

    /// Build a config with defaults for everything but the input path.
    #[allow(dead_code)]
    pub fn with_input(input_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            smoke_test: false,
            seed: DEFAULT_SEED,
            output_dir: PathBuf::from("."),
            log_dir: PathBuf::from("logs"),
        }
    }
}

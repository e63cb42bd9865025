//! Run Logger Module
//!
//! Persists one entry per pipeline run to a `run.log` file: start/end
//! timestamps, final status, info lines, and any errors. Only the last
//! 10 runs are retained to keep the file manageable. Writing is
//! best-effort: a failing run log never aborts the pipeline itself.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Maximum number of runs to keep in the log file.
const MAX_RUNS: usize = 10;

/// Name of the run log file.
const RUN_LOG_FILENAME: &str = "run.log";

/// Final state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Success,
    Failure,
}

/// Represents a single pipeline run entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEntry {
    /// Unique identifier for the run (timestamp-based).
    pub run_id: String,
    /// Start time of the run.
    pub start_time: DateTime<Local>,
    /// End time of the run (None while still running).
    pub end_time: Option<DateTime<Local>>,
    /// Current status of the run.
    pub status: RunStatus,
    /// Errors encountered during the run.
    pub errors: Vec<ErrorEntry>,
    /// Progress notes about the run.
    pub info: Vec<String>,
}

/// Represents an error that occurred during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Time when the error occurred.
    pub timestamp: DateTime<Local>,
    /// Error message.
    pub message: String,
    /// Optional context or location of the error.
    pub context: Option<String>,
}

/// Logger tracking the current pipeline run.
pub struct RunLogger {
    current_run: RunEntry,
    log_path: PathBuf,
}

impl RunLogger {
    /// Start tracking a new run, writing into `<log_dir>/run.log`.
    ///
    /// The directory is created if missing; failures are logged and the
    /// logger continues in-memory.
    pub fn start_run(log_dir: &Path) -> Self {
        let now = Local::now();
        let run_id = format!("run_{}", now.format("%Y%m%d_%H%M%S"));

        let current_run = RunEntry {
            run_id: run_id.clone(),
            start_time: now,
            end_time: None,
            status: RunStatus::Running,
            errors: Vec::new(),
            info: Vec::new(),
        };

        if let Err(e) = fs::create_dir_all(log_dir) {
            error!("Failed to create log directory: {}", e);
        }

        let mut logger = Self {
            current_run,
            log_path: log_dir.join(RUN_LOG_FILENAME),
        };

        logger.log_info("Pipeline started");
        logger.write_to_file();

        info!(
            "Run logger started. Run ID: {}, log file: {:?}",
            run_id, logger.log_path
        );

        logger
    }

    /// Logs a progress note for the current run.
    pub fn log_info(&mut self, message: &str) {
        self.current_run
            .info
            .push(format!("[{}] {}", Local::now().format("%H:%M:%S"), message));
    }

    /// Logs an error for the current run.
    pub fn log_error(&mut self, message: &str) {
        self.log_error_with_context(message, None);
    }

    /// Logs an error with optional context for the current run.
    pub fn log_error_with_context(&mut self, message: &str, context: Option<&str>) {
        self.current_run.errors.push(ErrorEntry {
            timestamp: Local::now(),
            message: message.to_string(),
            context: context.map(|s| s.to_string()),
        });
        self.write_to_file();
    }

    /// Completes the current run, stamping end time and final status.
    pub fn complete_run(&mut self, success: bool) {
        let end = Local::now();
        self.current_run.end_time = Some(end);
        self.current_run.status = if success {
            RunStatus::Success
        } else {
            RunStatus::Failure
        };

        let duration = end.signed_duration_since(self.current_run.start_time);
        self.log_info(&format!(
            "Pipeline {} (duration: {}s)",
            if success { "completed" } else { "failed" },
            duration.num_seconds()
        ));

        self.write_to_file();

        info!(
            "Run {} completed with status: {:?}",
            self.current_run.run_id, self.current_run.status
        );
    }

    /// The run entry being tracked (for inspection/testing).
    pub fn current_run(&self) -> &RunEntry {
        &self.current_run
    }

    /// All run entries currently stored in the log file.
    pub fn run_history(&self) -> Vec<RunEntry> {
        self.read_existing_runs()
    }

    /// Writes the current run to the log file, retaining only the last
    /// [`MAX_RUNS`] entries.
    fn write_to_file(&self) {
        let mut runs = self.read_existing_runs();

        match runs
            .iter_mut()
            .find(|run| run.run_id == self.current_run.run_id)
        {
            Some(existing) => *existing = self.current_run.clone(),
            None => runs.push(self.current_run.clone()),
        }

        if runs.len() > MAX_RUNS {
            let excess = runs.len() - MAX_RUNS;
            runs.drain(..excess);
        }

        if let Err(e) = self.write_runs_to_file(&runs) {
            error!("Failed to write run log: {}", e);
        }
    }

    /// Reads existing run entries from the log file. Comment and blank
    /// lines are ignored; unparseable entries are dropped.
    fn read_existing_runs(&self) -> Vec<RunEntry> {
        let file = match fs::File::open(&self.log_path) {
            Ok(file) => file,
            Err(_) => return Vec::new(),
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                serde_json::from_str::<RunEntry>(trimmed).ok()
            })
            .collect()
    }

    fn write_runs_to_file(&self, runs: &[RunEntry]) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.log_path)?;

        writeln!(file, "# QueryLens Run Log - Last {} runs", runs.len().min(MAX_RUNS))?;
        writeln!(file, "# Each line is a JSON object representing one run")?;
        writeln!(file)?;

        for run in runs {
            match serde_json::to_string(run) {
                Ok(json) => writeln!(file, "{}", json)?,
                Err(e) => error!("Failed to serialize run entry: {}", e),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_start_run_creates_entry() {
        let temp_dir = TempDir::new().unwrap();
        let logger = RunLogger::start_run(temp_dir.path());

        assert!(logger.current_run().run_id.starts_with("run_"));
        assert_eq!(logger.current_run().status, RunStatus::Running);
        assert!(logger.current_run().errors.is_empty());
        assert!(logger.current_run().end_time.is_none());
        assert!(logger.log_path.exists());
    }

    #[test]
    fn test_log_error_with_context() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = RunLogger::start_run(temp_dir.path());

        logger.log_error("plain error");
        logger.log_error_with_context("located error", Some("reader.rs:42"));

        let errors = &logger.current_run().errors;
        assert_eq!(errors.len(), 2);
        assert!(errors[0].context.is_none());
        assert_eq!(errors[1].context, Some("reader.rs:42".to_string()));
    }

    #[test]
    fn test_complete_run_success_and_failure() {
        let temp_dir = TempDir::new().unwrap();

        let mut logger = RunLogger::start_run(temp_dir.path());
        logger.complete_run(true);
        assert_eq!(logger.current_run().status, RunStatus::Success);
        assert!(logger.current_run().end_time.is_some());

        let mut logger = RunLogger::start_run(temp_dir.path());
        logger.log_error("boom");
        logger.complete_run(false);
        assert_eq!(logger.current_run().status, RunStatus::Failure);
    }

    #[test]
    fn test_write_and_read_runs() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = RunLogger::start_run(temp_dir.path());

        logger.log_info("processing chunk 1");
        logger.log_error("one bad line");
        logger.complete_run(true);

        let runs = logger.run_history();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].status, RunStatus::Success);
        assert_eq!(runs[0].errors.len(), 1);
    }

    #[test]
    fn test_rotation_keeps_last_runs() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join(RUN_LOG_FILENAME);

        for i in 0..(MAX_RUNS + 5) {
            let logger = RunLogger {
                current_run: RunEntry {
                    run_id: format!("run_{:03}", i),
                    start_time: Local::now(),
                    end_time: Some(Local::now()),
                    status: RunStatus::Success,
                    errors: Vec::new(),
                    info: Vec::new(),
                },
                log_path: log_path.clone(),
            };
            logger.write_to_file();
        }

        let logger = RunLogger {
            current_run: RunEntry {
                run_id: "probe".to_string(),
                start_time: Local::now(),
                end_time: None,
                status: RunStatus::Running,
                errors: Vec::new(),
                info: Vec::new(),
            },
            log_path,
        };
        let runs = logger.read_existing_runs();

        assert_eq!(runs.len(), MAX_RUNS);
        assert_eq!(runs[0].run_id, "run_005");
        assert_eq!(runs[MAX_RUNS - 1].run_id, "run_014");
    }

    #[test]
    fn test_serialization_round_trip() {
        let entry = RunEntry {
            run_id: "roundtrip".to_string(),
            start_time: Local::now(),
            end_time: Some(Local::now()),
            status: RunStatus::Success,
            errors: vec![ErrorEntry {
                timestamp: Local::now(),
                message: "bad line".to_string(),
                context: Some("line 7".to_string()),
            }],
            info: vec!["done".to_string()],
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: RunEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.run_id, entry.run_id);
        assert_eq!(parsed.status, entry.status);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.info.len(), 1);
    }
}

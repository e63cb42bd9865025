//! Chunked session ingestion.
//!
//! Streams a JSONL dump through a buffered reader, yielding bounded
//! chunks of parsed [`SessionRecord`]s. Chunk boundaries bound peak
//! memory only; they carry no semantic meaning, and re-chunking with a
//! different size leaves the aggregated statistics unchanged.
//!
//! A malformed line is a per-record failure: it is skipped with a
//! diagnostic, never aborting the run. I/O errors on the underlying
//! stream are fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::AppError;
use crate::models::SessionRecord;

/// Forward-only chunked reader over a line-delimited session source.
pub struct SessionReader<R> {
    reader: R,
    chunk_size: usize,
    lines_read: u64,
    skipped_lines: u64,
}

impl SessionReader<BufReader<File>> {
    /// Open a JSONL file for chunked reading.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, AppError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), chunk_size))
    }
}

impl<R: BufRead> SessionReader<R> {
    /// Wrap any buffered source. `chunk_size` is the maximum number of
    /// parsed records per chunk and must be at least 1.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            lines_read: 0,
            skipped_lines: 0,
        }
    }

    /// Read the next chunk, or `None` once the input is exhausted.
    ///
    /// Malformed lines are skipped and logged with their line number;
    /// blank lines are ignored. A returned chunk is never empty.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<SessionRecord>>, AppError> {
        let mut chunk = Vec::new();
        let mut line = String::new();

        while chunk.len() < self.chunk_size {
            line.clear();
            let bytes = self.reader.read_line(&mut line)?;
            if bytes == 0 {
                break;
            }
            self.lines_read += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<SessionRecord>(trimmed) {
                Ok(record) => chunk.push(record),
                Err(e) => {
                    self.skipped_lines += 1;
                    warn!(
                        line = self.lines_read,
                        "Skipping malformed session record: {}", e
                    );
                }
            }
        }

        if chunk.is_empty() {
            Ok(None)
        } else {
            Ok(Some(chunk))
        }
    }

    /// Total lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Lines skipped as malformed so far.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }
}

// Extraction progress tracing
// Append-only JSONL log of per-song pipeline stages for monitoring tools

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during trace operations
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Pipeline stage a trace entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Statistical part filtering
    PartFilter,

    /// Skyline reduction to a monophonic line
    Skyline,

    /// Rest splitting, pruning, and measure alignment
    Segmentation,
}

/// One line of the extraction trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// ISO 8601 timestamp of when this entry was created
    pub timestamp: String,

    /// Source identifier of the song being processed
    pub song_id: String,

    pub stage: Stage,

    /// Human-readable description of what happened
    pub message: String,

    /// Optional structured data (note counts, segment counts, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TraceEntry {
    /// Create an entry with the current timestamp.
    pub fn new(song_id: impl Into<String>, stage: Stage, message: impl Into<String>) -> Self {
        TraceEntry {
            timestamp: Utc::now().to_rfc3339(),
            song_id: song_id.into(),
            stage,
            message: message.into(),
            data: None,
        }
    }

    /// Create an entry carrying structured data.
    pub fn with_data(
        song_id: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        TraceEntry {
            timestamp: Utc::now().to_rfc3339(),
            song_id: song_id.into(),
            stage,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Append-only JSONL trace log.
///
/// Every entry becomes one JSON line; the file is created on first append.
#[derive(Debug, Clone)]
pub struct TraceLog {
    path: PathBuf,
}

impl TraceLog {
    pub fn new(path: PathBuf) -> Self {
        TraceLog { path }
    }

    /// Append a single entry.
    pub fn append(&self, entry: &TraceEntry) -> Result<(), TraceError> {
        self.append_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single open/flush cycle.
    pub fn append_batch(&self, entries: &[TraceEntry]) -> Result<(), TraceError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        for entry in entries {
            let json = serde_json::to_string(entry)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read all entries of a JSONL trace file. Blank lines are skipped.
pub fn read_trace_log(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let contents = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();

    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        entries.push(serde_json::from_str(line)?);
    }

    Ok(entries)
}

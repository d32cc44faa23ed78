//! Shared types and error handling for sdcs-bench.
//!
//! The driver invokes an external query executable (`sdcs <workload>
//! <block_size>`) once per trial, parses the runtimes it reports on stdout,
//! reduces repeated trials to per-phase medians and appends one CSV row per
//! block size.

pub mod parse;
pub mod report;
pub mod runner;
pub mod stats;
pub mod sweep;

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

// ────────────────────────────────────────────────────────────────────────────────
// Error type
// ────────────────────────────────────────────────────────────────────────────────

pub type BenchResult<T> = std::result::Result<T, BenchError>;

#[derive(Debug)]
pub enum BenchError {
    Io(std::io::Error),
    /// The subject executable could not be started at all. Fatal: the sweep
    /// has no recovery path when the binary under test is missing.
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    Config(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Io(e) => write!(f, "IO error: {}", e),
            BenchError::Launch { program, source } => {
                write!(f, "failed to launch {}: {}", program.display(), source)
            }
            BenchError::Csv(e) => write!(f, "CSV error: {}", e),
            BenchError::Config(s) => write!(f, "Config error: {}", s),
        }
    }
}

impl std::error::Error for BenchError {}

impl From<std::io::Error> for BenchError {
    fn from(e: std::io::Error) -> Self {
        BenchError::Io(e)
    }
}

impl From<csv::Error> for BenchError {
    fn from(e: csv::Error) -> Self {
        BenchError::Csv(e)
    }
}

// ────────────────────────────────────────────────────────────────────────────────
// Result cell
// ────────────────────────────────────────────────────────────────────────────────

/// One cell of the result table: either an aggregated median runtime in
/// seconds, or the sentinel for a cell no trial produced a value for
/// (rendered as `timeout` in the table).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Measured(f64),
    Unmeasured,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Measured(v) => write!(f, "{:.3}", v),
            Cell::Unmeasured => write!(f, "timeout"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Measured(v) => serializer.serialize_f64(*v),
            Cell::Unmeasured => serializer.serialize_str("timeout"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────────
// System info
// ────────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpus: usize,
    pub timestamp: String,
}

impl SystemInfo {
    pub fn collect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpus: std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
            timestamp: now_stamp(),
        }
    }
}

fn now_stamp() -> String {
    // simple timestamp without pulling in chrono
    let d = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}s-since-epoch", d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rendering() {
        assert_eq!(Cell::Measured(1.0).to_string(), "1.000");
        assert_eq!(Cell::Measured(0.1235).to_string(), "0.124");
        assert_eq!(Cell::Unmeasured.to_string(), "timeout");
    }

    #[test]
    fn test_cell_serializes_to_number_or_tag() {
        assert_eq!(
            serde_json::to_string(&Cell::Measured(2.5)).unwrap(),
            "2.5"
        );
        assert_eq!(
            serde_json::to_string(&Cell::Unmeasured).unwrap(),
            "\"timeout\""
        );
    }
}

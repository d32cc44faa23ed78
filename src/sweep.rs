//! The sweep state machine: block sizes outer, workloads inner, warmup then
//! measurement per pair, one durable CSV row per block size.

use crate::report::{column_headers, CsvReporter};
use crate::runner::TrialRunner;
use crate::stats::median_at;
use crate::{BenchResult, Cell, SystemInfo};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

// ────────────────────────────────────────────────────────────────────────────────
// Config
// ────────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Input-block sizes to sweep, in ascending order.
    pub block_sizes: Vec<u64>,
    /// Workload identifiers the subject understands, in column order.
    pub workloads: Vec<u32>,
    /// Discarded trials run before each measured batch, against cold-start
    /// effects in the subject.
    pub warmup_trials: usize,
    /// Trials per measured batch.
    pub measure_trials: usize,
    /// Timing lines the subject reports per trial (one per query sub-phase).
    pub timings_per_trial: usize,
    /// CSV output path; truncated and header-initialized at sweep start.
    pub output_path: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            block_sizes: (0..10).map(|i| 1000u64 << i).collect(),
            workloads: vec![1, 2, 3, 4],
            warmup_trials: 2,
            measure_trials: 10,
            timings_per_trial: 3,
            output_path: PathBuf::from("results.csv"),
        }
    }
}

impl SweepConfig {
    /// Result-row width: one cell per (workload, timing position) pair.
    pub fn row_width(&self) -> usize {
        self.workloads.len() * self.timings_per_trial
    }
}

// ────────────────────────────────────────────────────────────────────────────────
// Summary types
// ────────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub block_size: u64,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub system_info: SystemInfo,
    pub columns: Vec<String>,
    pub rows: Vec<SweepRow>,
}

// ────────────────────────────────────────────────────────────────────────────────
// Sweep
// ────────────────────────────────────────────────────────────────────────────────

/// Drive the full sweep. Strictly sequential: block sizes, workloads and
/// trials all run one at a time so trials never compete for the machine.
///
/// Each block size's row is written and flushed before the next block size
/// starts. A truncated batch yields fewer samples (or the sentinel) for its
/// cells; only a launch failure aborts the sweep.
pub fn run_sweep(
    config: &SweepConfig,
    runner: &TrialRunner,
    reporter: &mut CsvReporter,
) -> BenchResult<SweepSummary> {
    let mut summary = SweepSummary {
        system_info: SystemInfo::collect(),
        columns: column_headers(&config.workloads, config.timings_per_trial),
        rows: Vec::with_capacity(config.block_sizes.len()),
    };

    for &block_size in &config.block_sizes {
        let mut cells = Vec::with_capacity(config.row_width());

        for &workload in &config.workloads {
            info!(
                "warming up workload {} with block size {}",
                workload, block_size
            );
            let warmup = runner.collect_batch(workload, block_size, config.warmup_trials)?;
            debug!(
                "warmup batch for workload {} block size {}: {:?}",
                workload, block_size, warmup
            );

            info!(
                "benchmarking workload {} with block size {}",
                workload, block_size
            );
            let batch = runner.collect_batch(workload, block_size, config.measure_trials)?;
            debug!(
                "measured batch for workload {} block size {}: {:?}",
                workload, block_size, batch
            );

            for position in 0..config.timings_per_trial {
                cells.push(median_at(&batch, position));
            }
        }

        reporter.append_row(&cells)?;
        summary.rows.push(SweepRow { block_size, cells });
    }

    info!("finished");
    Ok(summary)
}

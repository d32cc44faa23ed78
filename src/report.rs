//! Result persistence and presentation: incremental CSV table, console
//! summary table, JSON export.

use crate::sweep::SweepSummary;
use crate::{BenchError, BenchResult, Cell};
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use std::fs::File;
use std::path::Path;

/// Column names of the result table: `w1'`, `w1''`, `w1'''`, `w2'`, … —
/// one prime per timing position, one group per workload, in workload order.
pub fn column_headers(workloads: &[u32], timings_per_trial: usize) -> Vec<String> {
    workloads
        .iter()
        .flat_map(|w| {
            (1..=timings_per_trial).map(move |p| format!("w{}{}", w, "'".repeat(p)))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────────
// CSV table
// ────────────────────────────────────────────────────────────────────────────────

/// Append-only CSV table. Created (truncating any previous file) with the
/// header row at sweep start; every appended row is flushed immediately so
/// each block size's result is durable before the next one starts.
pub struct CsvReporter {
    writer: csv::Writer<File>,
    columns: usize,
}

impl CsvReporter {
    pub fn create(path: &Path, workloads: &[u32], timings_per_trial: usize) -> BenchResult<Self> {
        let headers = column_headers(workloads, timings_per_trial);
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&headers)?;
        writer.flush()?;
        Ok(Self {
            writer,
            columns: headers.len(),
        })
    }

    pub fn append_row(&mut self, cells: &[Cell]) -> BenchResult<()> {
        if cells.len() != self.columns {
            return Err(BenchError::Config(format!(
                "result row has {} cells, table has {} columns",
                cells.len(),
                self.columns
            )));
        }
        self.writer
            .write_record(cells.iter().map(|c| c.to_string()))?;
        self.writer.flush()?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────────
// Console summary
// ────────────────────────────────────────────────────────────────────────────────

/// Print the aggregated sweep as one table, block sizes down the side.
pub fn print_summary(summary: &SweepSummary) {
    println!("\n{}", "━━━ Sweep results (median seconds) ━━━".bold().cyan());
    println!(
        "  OS: {}  Arch: {}  CPUs: {}  Time: {}",
        summary.system_info.os,
        summary.system_info.arch,
        summary.system_info.cpus,
        summary.system_info.timestamp
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    let mut header = vec!["block size".to_string()];
    header.extend(summary.columns.iter().cloned());
    table.set_header(header);

    for row in &summary.rows {
        let mut cells = vec![row.block_size.to_string()];
        cells.extend(row.cells.iter().map(|c| c.to_string()));
        table.add_row(cells);
    }

    println!("{table}");
}

// ────────────────────────────────────────────────────────────────────────────────
// JSON export
// ────────────────────────────────────────────────────────────────────────────────

pub fn export_json(summary: &SweepSummary, path: &Path) -> BenchResult<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| BenchError::Config(format!("JSON serialization failed: {}", e)))?;
    std::fs::write(path, json)?;
    println!("  JSON exported to {}", path.display());
    Ok(())
}

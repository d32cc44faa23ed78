//! sdcs-bench — benchmark driver for the sdcs query executable.
//!
//! Usage:
//!   sdcs-bench ./sdcs                        # reference sweep, results.csv
//!   sdcs-bench ./sdcs --block-sizes 1000,4000 --workloads 1,2
//!   sdcs-bench ./sdcs --trials 20 --json results.json

use clap::Parser;
use colored::Colorize;
use sdcs_bench::report::{self, CsvReporter};
use sdcs_bench::runner::TrialRunner;
use sdcs_bench::sweep::{run_sweep, SweepConfig};
use sdcs_bench::BenchResult;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Parser, Debug)]
#[command(name = "sdcs-bench", about = "Sweep benchmark driver for the sdcs query executable")]
struct Cli {
    /// Path to the query-processing executable under test.
    executable: PathBuf,

    /// Block sizes to sweep, ascending (comma-separated).
    #[arg(long, value_delimiter = ',',
          default_value = "1000,2000,4000,8000,16000,32000,64000,128000,256000,512000")]
    block_sizes: Vec<u64>,

    /// Workload identifiers, in column order (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "1,2,3,4")]
    workloads: Vec<u32>,

    /// Warmup trials per (workload, block size) pair; results are discarded.
    #[arg(long, default_value = "2")]
    warmup: usize,

    /// Measured trials per (workload, block size) pair.
    #[arg(long, default_value = "10")]
    trials: usize,

    /// Timing lines the subject reports per trial.
    #[arg(long, default_value = "3")]
    timings: usize,

    /// CSV output path (truncated at startup).
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// Verbose log destination (debug level, truncated at startup).
    #[arg(long, default_value = "results.log")]
    log_file: PathBuf,

    /// Also export the aggregated summary as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

/// Build the two logging destinations: the verbose record (everything at
/// debug and above, including raw batches) and the console stream (info and
/// above, overridable via RUST_LOG). Warnings and errors reach both.
fn init_logging(log_file: &Path) -> BenchResult<()> {
    let file = File::create(log_file)?;

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .with_filter(LevelFilter::DEBUG);

    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}

fn main() -> BenchResult<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = SweepConfig {
        block_sizes: cli.block_sizes,
        workloads: cli.workloads,
        warmup_trials: cli.warmup,
        measure_trials: cli.trials,
        timings_per_trial: cli.timings,
        output_path: cli.output,
    };

    println!("\n{}", "╔══════════════════════════════════════════════════════╗".bold().blue());
    println!("{}", "║              sdcs benchmark sweep                    ║".bold().blue());
    println!("{}", "╚══════════════════════════════════════════════════════╝".bold().blue());
    println!(
        "  Subject: {}  Workloads: {:?}  BlockSizes: {}..{}",
        cli.executable.display(),
        config.workloads,
        config.block_sizes.first().copied().unwrap_or(0),
        config.block_sizes.last().copied().unwrap_or(0),
    );
    println!(
        "  Warmup: {}  Trials: {}  Timings/trial: {}  Output: {}",
        config.warmup_trials,
        config.measure_trials,
        config.timings_per_trial,
        config.output_path.display(),
    );

    let runner = TrialRunner::new(&cli.executable);
    let mut reporter = CsvReporter::create(
        &config.output_path,
        &config.workloads,
        config.timings_per_trial,
    )?;

    let summary = run_sweep(&config, &runner, &mut reporter)?;

    report::print_summary(&summary);

    if let Some(ref path) = cli.json {
        report::export_json(&summary, path)?;
    }

    Ok(())
}

//! Trial execution: one subprocess invocation per trial, and batch
//! collection with the short-circuit policy.

use crate::parse::extract_runtimes;
use crate::{BenchError, BenchResult};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::{error, warn};

/// Output of one subject invocation. Consumed immediately by the collector.
#[derive(Debug)]
pub struct TrialOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Invokes the subject executable as `<executable> <workload> <block_size>`,
/// one blocking subprocess per trial. No shell is involved; the two
/// parameters are passed as positional arguments.
pub struct TrialRunner {
    executable: PathBuf,
}

impl TrialRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Run one trial and capture its outcome. A non-zero exit status is
    /// returned as data; only a spawn failure is an error, and that one is
    /// fatal for the whole sweep.
    pub fn run_trial(&self, workload: u32, block_size: u64) -> BenchResult<TrialOutput> {
        let output = Command::new(&self.executable)
            .arg(workload.to_string())
            .arg(block_size.to_string())
            .output()
            .map_err(|source| BenchError::Launch {
                program: self.executable.clone(),
                source,
            })?;

        Ok(TrialOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run up to `trials` sequential trials for one (workload, block size)
    /// pair and return the measurement vectors of the ones that completed.
    ///
    /// A trial that exits non-zero or writes to stderr truncates the batch:
    /// the event is logged and no further trials run for this pair. Callers
    /// must expect fewer than `trials` vectors.
    pub fn collect_batch(
        &self,
        workload: u32,
        block_size: u64,
        trials: usize,
    ) -> BenchResult<Vec<Vec<f64>>> {
        let mut batch = Vec::with_capacity(trials);

        for _ in 0..trials {
            let trial = self.run_trial(workload, block_size)?;

            if !trial.status.success() {
                match trial.status.code() {
                    Some(code) => error!(
                        "workload {} block size {}: subject exited with code {}",
                        workload, block_size, code
                    ),
                    None => error!(
                        "workload {} block size {}: subject terminated by signal",
                        workload, block_size
                    ),
                }
                break;
            }

            if !trial.stderr.is_empty() {
                warn!(
                    "workload {} block size {}: subject wrote to stderr: {}",
                    workload,
                    block_size,
                    trial.stderr.trim_end()
                );
                break;
            }

            batch.push(extract_runtimes(&trial.stdout));
        }

        Ok(batch)
    }
}

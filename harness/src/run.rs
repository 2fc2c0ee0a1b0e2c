//! Suite orchestration: drive the target across a year range and aggregate
//! pass/fail results.
//!
//! Strictly sequential: one target process is spawned, awaited (bounded by
//! the timeout), and reaped before the next year begins. Per-year failures
//! are recorded and the loop continues; precondition violations abort before
//! any process is spawned.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::{debug, info, instrument, warn};

use crate::core::classify::{YearOutcome, classify};
use crate::core::zodiac::expected_output;
use crate::io::config::{MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::io::process::run_command_with_timeout;

/// Parameters for one conformance run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Target program under test, invoked as `<target> <year>`.
    pub target: PathBuf,
    /// Last year tested; the suite covers `1..=end_year`.
    pub end_year: i64,
    /// Wall-clock budget per target invocation, in whole seconds.
    pub timeout_secs: u64,
    /// Truncate captured target output beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl SuiteConfig {
    /// Check preconditions. Must pass before any target process is spawned.
    pub fn validate(&self) -> Result<()> {
        if !self.target.exists() {
            bail!("target file {} is not found", self.target.display());
        }
        if self.end_year < 1 {
            bail!("end year must be at least 1, got {}", self.end_year);
        }
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            bail!("timeout has to be {MIN_TIMEOUT_SECS}-{MAX_TIMEOUT_SECS} seconds");
        }
        if self.output_limit_bytes == 0 {
            bail!("output_limit_bytes must be > 0");
        }
        Ok(())
    }
}

/// Aggregate counts for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteReport {
    pub total: u64,
    pub failed: u64,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}

/// Run the full conformance suite against the configured target.
///
/// The transcript (per-year announcements and the final summary) is written
/// to `out`. Returns the aggregate report; `passed()` iff no year failed.
#[instrument(skip_all, fields(target = %cfg.target.display(), end_year = cfg.end_year))]
pub fn run_suite(cfg: &SuiteConfig, out: &mut impl Write) -> Result<SuiteReport> {
    cfg.validate()?;
    let timeout = Duration::from_secs(cfg.timeout_secs);

    info!("suite started");
    writeln!(out, "Initial test from year 1 - {}", cfg.end_year)?;

    let mut report = SuiteReport {
        total: 0,
        failed: 0,
    };
    for year in 1..=cfg.end_year {
        write!(out, "testing year {year}... ")?;
        let expected = expected_output(year);
        let stdout = capture_target_stdout(cfg, year, timeout);
        let outcome = classify(&expected, &stdout);

        report.total += 1;
        match &outcome {
            YearOutcome::Pass => writeln!(out, "pass")?,
            YearOutcome::NoOutput => {
                report.failed += 1;
                writeln!(out, "failed")?;
                writeln!(out, "The target failed to produce output before timeout")?;
            }
            YearOutcome::Mismatch { expected, received } => {
                report.failed += 1;
                writeln!(out, "failed")?;
                writeln!(
                    out,
                    "The expected value is '{expected}' but the received value is '{received}'"
                )?;
            }
        }
        debug!(year, pass = outcome.is_pass(), "year finished");
    }

    writeln!(out, "Total {} tests, {} failed.", report.total, report.failed)?;
    if report.passed() {
        writeln!(out, "The test is passed.")?;
    } else {
        writeln!(out, "The test is failed.")?;
    }
    info!(total = report.total, failed = report.failed, "suite finished");
    Ok(report)
}

/// Invoke the target for one year and return its captured stdout.
///
/// Spawn errors, timeouts, and crashes all surface as empty output; only
/// stdout content matters to classification. Exit code and stderr are never
/// inspected.
fn capture_target_stdout(cfg: &SuiteConfig, year: i64, timeout: Duration) -> Vec<u8> {
    let mut cmd = Command::new(&cfg.target);
    cmd.arg(year.to_string());
    match run_command_with_timeout(cmd, timeout, cfg.output_limit_bytes) {
        Ok(output) => {
            if output.timed_out {
                warn!(year, "target timed out");
            }
            output.stdout
        }
        Err(err) => {
            warn!(year, err = %err, "target invocation failed");
            Vec::new()
        }
    }
}

//! Chinese zodiac conformance harness CLI.
//!
//! Computes the expected zodiac designation for every year in a range and
//! compares it against the stdout of an external target program, one
//! subprocess invocation per year under a wall-clock timeout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use harness::io::config::HarnessConfig;
use harness::run::{SuiteConfig, run_suite};
use harness::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "harness",
    version,
    about = "Conformance harness for Chinese zodiac target programs"
)]
struct Cli {
    /// Target program under test, invoked as `<target> <year>`.
    #[arg(default_value = "./test_target")]
    target: PathBuf,

    /// Last year to test; the suite covers years 1 through this value.
    #[arg(default_value_t = 200)]
    end_year: i64,
}

fn main() {
    logging::init();
    match run() {
        Ok(true) => std::process::exit(exit_codes::OK),
        Ok(false) => std::process::exit(exit_codes::FAILED),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let config = HarnessConfig::load(Path::new("harness.toml")).context("load harness.toml")?;
    let cfg = SuiteConfig {
        target: cli.target,
        end_year: cli.end_year,
        timeout_secs: config.timeout_secs,
        output_limit_bytes: config.output_limit_bytes,
    };
    let report = run_suite(&cfg, &mut std::io::stdout().lock())?;
    Ok(report.passed())
}

//! Harness configuration stored in `harness.toml`.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Smallest accepted per-invocation timeout, in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Largest accepted per-invocation timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 5;

/// Harness configuration (TOML).
///
/// This file is intended to be edited by humans; the CLI surface stays
/// positional-only. Missing fields default to the documented test contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Wall-clock budget per target invocation, in whole seconds.
    pub timeout_secs: u64,

    /// Truncate captured target stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 1,
            output_limit_bytes: 65_536,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(anyhow!(
                "timeout_secs has to be {MIN_TIMEOUT_SECS}-{MAX_TIMEOUT_SECS} seconds"
            ));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        Ok(())
    }

    /// Read config from a TOML file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let cfg = match fs::read_to_string(path) {
            Ok(contents) => {
                toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist config as TOML, staging to a sibling file and renaming so a
    /// concurrent reader never sees a partial write.
    pub fn store(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let rendered = toml::to_string_pretty(self).context("serialize config")?;
        let staged = path.with_extension("toml.tmp");
        fs::write(&staged, format!("{rendered}\n"))
            .with_context(|| format!("stage config at {}", staged.display()))?;
        fs::rename(&staged, path)
            .with_context(|| format!("install config at {}", path.display()))?;
        Ok(())
    }
}

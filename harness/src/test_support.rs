//! Test-only helpers for constructing fake target programs.
//!
//! Targets are written as executable `/bin/sh` scripts inside a temporary
//! directory, so suite tests exercise the real spawn/timeout/capture path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::zodiac::expected_output;

/// Temporary directory holding generated target scripts.
pub struct TargetDir {
    dir: TempDir,
}

impl TargetDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create target dir")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Target that prints the exact expected string (with trailing newline)
    /// for every year in `1..=end_year`.
    pub fn faithful_target(&self, end_year: i64) -> Result<PathBuf> {
        let mut script = String::from("#!/bin/sh\ncase \"$1\" in\n");
        for year in 1..=end_year {
            script.push_str(&format!(
                "{year}) printf '%s\\n' '{}' ;;\n",
                expected_output(year)
            ));
        }
        script.push_str("esac\n");
        self.write_script("faithful_target", &script)
    }

    /// Target that prints the same string for every year.
    pub fn constant_target(&self, line: &str) -> Result<PathBuf> {
        self.write_script(
            "constant_target",
            &format!("#!/bin/sh\nprintf '%s\\n' '{line}'\n"),
        )
    }

    /// Target that sleeps past the harness timeout and never prints.
    pub fn sleeping_target(&self, sleep_secs: u64) -> Result<PathBuf> {
        self.write_script(
            "sleeping_target",
            &format!("#!/bin/sh\nexec sleep {sleep_secs}\n"),
        )
    }

    /// Target that prints nothing and exits non-zero.
    pub fn silent_failing_target(&self) -> Result<PathBuf> {
        self.write_script("silent_failing_target", "#!/bin/sh\nexit 3\n")
    }

    fn write_script(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        make_executable(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).with_context(|| format!("chmod {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

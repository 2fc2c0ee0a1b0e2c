//! Running child processes with a timeout and bounded output capture.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// Captured child process output.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

/// Run a command with a timeout and capture stdout/stderr without risking
/// pipe deadlocks.
///
/// Both pipes are drained concurrently while the child runs;
/// `output_limit_bytes` bounds the bytes kept in memory per stream (the rest
/// is discarded while still draining the pipe). On timeout expiry the child
/// is killed and reaped before this function returns, so no process outlives
/// the call.
#[instrument(skip_all, fields(timeout_secs = timeout.as_secs(), output_limit_bytes))]
pub fn run_command_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Result<CommandOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || drain_limited(stdout, output_limit_bytes));
    let stderr_handle = thread::spawn(move || drain_limited(stderr, output_limit_bytes));

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            child.kill().context("kill command")?;
            child.wait().context("wait command after kill")?
        }
    };

    let (stdout, stdout_discarded) = join_reader(stdout_handle).context("join stdout")?;
    let (stderr, stderr_discarded) = join_reader(stderr_handle).context("join stderr")?;
    if stdout_discarded > 0 || stderr_discarded > 0 {
        warn!(stdout_discarded, stderr_discarded, "output truncated");
    }

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(CommandOutput {
        status,
        stdout,
        stderr,
        timed_out,
    })
}

fn join_reader(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

/// Read a stream to EOF, keeping at most `limit` bytes.
///
/// Returns the kept bytes and the number of bytes discarded.
fn drain_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut discarded = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        let keep = n.min(remaining);
        buf.extend_from_slice(&chunk[..keep]);
        discarded += n - keep;
    }

    Ok((buf, discarded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn captures_stdout_of_fast_command() {
        let output = run_command_with_timeout(sh("echo captured"), Duration::from_secs(1), 65_536)
            .expect("run command");
        assert!(!output.timed_out);
        assert!(output.status.success());
        assert_eq!(output.stdout, b"captured\n");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn captures_stderr_separately() {
        let output =
            run_command_with_timeout(sh("echo oops >&2"), Duration::from_secs(1), 65_536)
                .expect("run command");
        assert!(output.stdout.is_empty());
        assert_eq!(output.stderr, b"oops\n");
    }

    #[test]
    fn kills_command_on_timeout() {
        let started = std::time::Instant::now();
        let output = run_command_with_timeout(
            sh("exec sleep 5"),
            Duration::from_millis(200),
            65_536,
        )
        .expect("run command");
        assert!(output.timed_out);
        assert!(output.stdout.is_empty());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn discards_output_beyond_limit() {
        let output = run_command_with_timeout(sh("echo 0123456789"), Duration::from_secs(1), 4)
            .expect("run command");
        assert_eq!(output.stdout, b"0123");
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let cmd = Command::new("/nonexistent/program");
        let err = run_command_with_timeout(cmd, Duration::from_secs(1), 65_536)
            .expect_err("spawn should fail");
        assert!(err.to_string().contains("spawn command"));
    }

    #[test]
    fn nonzero_exit_still_captures_stdout() {
        let output =
            run_command_with_timeout(sh("echo partial; exit 3"), Duration::from_secs(1), 65_536)
                .expect("run command");
        assert!(!output.status.success());
        assert_eq!(output.stdout, b"partial\n");
    }
}

//! Deadline-bounded child process execution.
//!
//! On unix the browser leads its own process group, and the whole group is
//! killed once the run ends. Chromium helpers and launcher-script children
//! belong to that group.

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use teto_traits::RenderError;

/// How often the exit status is polled while waiting on the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long stderr may keep draining after the process group is gone.
const STDERR_GRACE: Duration = Duration::from_millis(200);

/// Captured result of a finished process.
#[derive(Debug)]
pub(crate) struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Kills the child's process group and reaps the child when dropped.
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    /// Polls for exit until `deadline`; `None` means still running.
    fn wait_until(&mut self, deadline: Instant) -> io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }

    #[cfg(unix)]
    fn kill_group(&mut self) {
        let Ok(pgid) = libc::pid_t::try_from(self.child.id()) else {
            return;
        };
        tracing::debug!(pgid, "Killing browser process group");
        // SAFETY: killpg only takes integer arguments. The group was created
        // for this child at spawn, and its id stays reserved while any member
        // is alive.
        unsafe {
            libc::killpg(pgid, libc::SIGKILL);
        }
    }

    #[cfg(not(unix))]
    fn kill_group(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            tracing::debug!(pid = self.child.id(), "Killing browser process");
            let _ = self.child.kill();
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.kill_group();
        let _ = self.child.wait();
    }
}

fn spawn(program: &Path, args: &[OsString]) -> Result<Child, RenderError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => RenderError::Navigation(format!(
            "browser executable {} not found",
            program.display()
        )),
        _ => RenderError::Io(format!("cannot start {}: {e}", program.display())),
    })
}

/// Runs `program` with `args`, collecting stdout and stderr. The run fails
/// with [`RenderError::Timeout`] unless stdout closes and the process exits
/// within `timeout`. Any processes it started are killed before returning.
pub(crate) fn run_with_deadline(
    program: &Path,
    args: &[OsString],
    timeout: Duration,
) -> Result<ProcessOutput, RenderError> {
    let deadline = Instant::now() + timeout;
    let mut guard = ChildGuard {
        child: spawn(program, args)?,
    };

    let stdout = guard
        .child
        .stdout
        .take()
        .ok_or_else(|| RenderError::Io("browser stdout not captured".into()))?;
    let stderr = guard
        .child
        .stderr
        .take()
        .ok_or_else(|| RenderError::Io("browser stderr not captured".into()))?;

    let stdout_rx = read_in_background(stdout);
    let stderr_rx = read_in_background(stderr);

    let timed_out = || {
        tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Browser timed out");
        RenderError::Timeout(timeout)
    };

    let stdout = match stdout_rx.recv_timeout(timeout) {
        Ok(read) => read?,
        Err(RecvTimeoutError::Timeout) => return Err(timed_out()),
        Err(RecvTimeoutError::Disconnected) => {
            return Err(RenderError::Io("browser stdout reader stopped".into()));
        }
    };

    let status = guard.wait_until(deadline)?.ok_or_else(timed_out)?;
    // Helpers left behind may still hold stderr open.
    guard.kill_group();

    let remaining = deadline.saturating_duration_since(Instant::now());
    let stderr = match stderr_rx.recv_timeout(remaining.max(STDERR_GRACE)) {
        Ok(read) => read.unwrap_or_default(),
        Err(_) => String::new(),
    };

    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}

fn read_in_background<R>(mut pipe: R) -> mpsc::Receiver<io::Result<String>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = pipe
            .read_to_end(&mut buf)
            .map(|_| String::from_utf8_lossy(&buf).into_owned());
        let _ = tx.send(result);
    });
    rx
}

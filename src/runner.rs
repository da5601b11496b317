/// Child process execution with captured output.
///
/// Output is captured in full and handed back once the child exits; nothing is
/// streamed. Stdin is not forwarded.
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::exitcode;
use crate::invocation::{ToolCommand, WrapError};

/// How often to poll the child while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// What the tool did: its exit code and everything it printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutcome {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status_code == exitcode::OK
    }

    fn from_output(output: &Output) -> Self {
        Self {
            status_code: status_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Run `cmd` to completion and capture its output.
///
/// With `timeout` set, the child is killed once the limit passes.
///
/// # Errors
///
/// - `WrapError::ToolNotFound` / `WrapError::ToolLaunch` — spawn failed
/// - `WrapError::Timeout` — the child outlived `timeout`
/// - `WrapError::Io` — waiting or reading pipes failed
pub fn run(cmd: &ToolCommand, timeout: Option<Duration>) -> Result<ToolOutcome, WrapError> {
    let child = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| WrapError::from_spawn(&cmd.program, e))?;

    tracing::debug!(pid = child.id(), program = %cmd.program, "spawned external tool");

    // A limit too large to represent as an `Instant` is treated as no limit.
    let deadline = timeout.and_then(|limit| {
        let deadline = Instant::now().checked_add(limit);
        if deadline.is_none() {
            tracing::debug!(secs = limit.as_secs(), "timeout out of range, waiting unbounded");
        }
        deadline.map(|at| (limit, at))
    });

    let output = match deadline {
        None => child.wait_with_output().map_err(|source| WrapError::Io {
            context: "waiting for the external tool",
            source,
        })?,
        Some((limit, at)) => wait_with_deadline(child, &cmd.program, limit, at)?,
    };

    let outcome = ToolOutcome::from_output(&output);
    tracing::debug!(
        status = outcome.status_code,
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "external tool exited"
    );
    Ok(outcome)
}

/// Wait for `child`, draining both pipes on helper threads so a chatty child
/// cannot block on a full pipe while we poll.
fn wait_with_deadline(
    mut child: Child,
    program: &str,
    limit: Duration,
    deadline: Instant,
) -> Result<Output, WrapError> {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                tracing::warn!(program, secs = limit.as_secs(), "timeout expired, killing tool");
                // The child may exit between try_wait and kill; either way reap it.
                let _ = child.kill();
                let _ = child.wait();
                return Err(WrapError::Timeout {
                    program: program.to_owned(),
                    after: limit,
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                return Err(WrapError::Io {
                    context: "polling the external tool",
                    source,
                });
            }
        }
    };

    Ok(Output {
        status,
        stdout: collect(stdout)?,
        stderr: collect(stderr)?,
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, WrapError> {
    let Some(handle) = handle else {
        return Ok(Vec::new());
    };
    let read = handle.join().map_err(|_| WrapError::Io {
        context: "reading tool output",
        source: io::Error::other("pipe reader thread panicked"),
    })?;
    read.map_err(|source| WrapError::Io {
        context: "reading tool output",
        source,
    })
}

/// Exit code to mirror for `status`: the child's own code, or `128 + signal`
/// when it was killed by a signal.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exitcode::SIGNAL_BASE + signal;
        }
    }
    1
}

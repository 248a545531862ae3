use crate::error::ReasonerError;
use std::ffi::OsStr;
use std::io::{self, Read};
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What an external program reported once it exited.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub(crate) fn into_failure(self, program: &str) -> ReasonerError {
        ReasonerError::ToolFailed {
            program: program.into(),
            status: self.status,
            stdout: self.stdout,
            stderr: self.stderr,
        }
    }
}

/// Runs `program` with `args` until it exits or `timeout` elapses.
///
/// Both output pipes are drained by helper threads while waiting.
/// On timeout the child is killed and reaped.
pub(crate) fn run<I, S>(
    program: &str,
    args: I,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, ReasonerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    // Helper processes started by the program are killed with it on timeout.
    #[cfg(unix)]
    command.process_group(0);
    debug!(?command, "spawning external program");
    let mut child = command.spawn().map_err(|source| ReasonerError::Spawn {
        program: program.into(),
        source,
    })?;
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let status = match wait(&mut child, timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            // Not joining the drain threads: a process outside of the group may hold the pipes.
            kill(&mut child);
            return Err(ReasonerError::Timeout {
                program: program.into(),
                timeout: timeout.unwrap_or_default(),
            });
        }
        Err(e) => {
            kill(&mut child);
            return Err(e.into());
        }
    };
    Ok(ProcessOutput {
        status,
        stdout: join(stdout)?,
        stderr: join(stderr)?,
    })
}

/// Returns `None` if the timeout elapsed before the child exited.
fn wait(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn kill(child: &mut Child) {
    if let Err(error) = kill_group(child) {
        warn!(%error, pid = child.id(), "failed to kill an external program");
    }
    if let Err(error) = child.wait() {
        warn!(%error, pid = child.id(), "failed to wait for a killed program");
    }
}

/// Kills the process group led by `child`.
#[cfg(unix)]
#[expect(unsafe_code)]
fn kill_group(child: &mut Child) -> io::Result<()> {
    let group = libc::pid_t::try_from(child.id()).map_err(io::Error::other)?;
    // SAFETY: killpg only takes plain integers
    if unsafe { libc::killpg(group, libc::SIGKILL) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> Option<JoinHandle<io::Result<Vec<u8>>>> {
    let mut pipe = pipe?;
    Some(thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer)?;
        Ok(buffer)
    }))
}

fn join(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<String> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let buffer = handle
        .join()
        .map_err(|_| io::Error::other("The output reader thread panicked"))??;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

//! Bounded subprocess execution.
//!
//! Every external command the statusline runs (git, the macOS `security` tool)
//! goes through [`output_with_timeout`], which kills the child once its budget
//! is spent instead of letting a wedged process hold up the whole render.
//!
//! On Unix the child leads its own process group and the whole group is
//! killed on timeout, so helpers it forked (a `sh -c` wrapper, git hooks, an
//! fsmonitor daemon) cannot keep the stdout pipe open past the deadline.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Runs `cmd` and returns its stdout if it exits successfully within `timeout`.
///
/// Spawn failures, non-zero exits, timeouts and non-UTF-8 output all yield `None`.
/// The call never blocks past `timeout` plus one poll interval.
pub fn output_with_timeout(cmd: &mut Command, timeout: Duration) -> Option<String> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    own_process_group(cmd);
    let mut child = cmd.spawn().ok()?;

    // Drain stdout on a detached helper so a chatty child cannot block on a
    // full pipe, and so a descendant holding the pipe cannot block us.
    let mut stdout = child.stdout.take()?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = tx.send(stdout.read_to_end(&mut buf).ok().map(|_| buf));
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                terminate(&mut child);
                tracing::debug!(
                    program = ?cmd.get_program(),
                    timeout_ms = timeout.as_millis() as u64,
                    "command timed out"
                );
                return None;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(_) => {
                terminate(&mut child);
                return None;
            }
        }
    };

    let remaining = deadline.saturating_duration_since(Instant::now());
    let buf = match rx.recv_timeout(remaining) {
        Ok(buf) => buf,
        Err(_) => {
            // The child exited but something it spawned still holds stdout.
            terminate(&mut child);
            tracing::debug!(program = ?cmd.get_program(), "stdout held open past deadline");
            return None;
        }
    };

    if !status.success() {
        return None;
    }
    String::from_utf8(buf?).ok()
}

fn terminate(child: &mut Child) {
    if let Err(e) = kill_process_group(child) {
        tracing::debug!(error = %e, "failed to kill process group");
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn own_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_cmd: &mut Command) {}

/// SIGKILL to the child's group. The group id equals the child's pid because
/// it was spawned as the group leader.
#[cfg(unix)]
fn kill_process_group(child: &Child) -> io::Result<()> {
    let pgid = child.id() as libc::pid_t;
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } == -1 {
        let err = io::Error::last_os_error();
        // ESRCH: the group is already gone.
        if err.raw_os_error() != Some(libc::ESRCH) {
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) -> io::Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "echo hello"]),
            Duration::from_secs(2),
        );
        assert_eq!(out.as_deref().map(str::trim), Some("hello"));
    }

    #[test]
    fn nonzero_exit_is_none() {
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "echo nope; exit 3"]),
            Duration::from_secs(2),
        );
        assert!(out.is_none());
    }

    #[test]
    fn missing_binary_is_none() {
        let out = output_with_timeout(
            &mut Command::new("definitely-not-a-real-binary-xyz"),
            Duration::from_secs(1),
        );
        assert!(out.is_none());
    }

    #[test]
    fn slow_command_is_killed() {
        let start = Instant::now();
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "exec sleep 5"]),
            Duration::from_millis(100),
        );
        assert!(out.is_none());
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn shell_wrapper_with_child_is_bounded() {
        let start = Instant::now();
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "sleep 3; echo late"]),
            Duration::from_millis(100),
        );
        assert!(out.is_none());
        assert!(
            start.elapsed() < Duration::from_secs(1),
            "took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn background_child_holding_stdout_is_bounded() {
        let start = Instant::now();
        let out = output_with_timeout(
            Command::new("sh").args(["-c", "echo early; sleep 3 &"]),
            Duration::from_millis(200),
        );
        assert!(out.is_none());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}

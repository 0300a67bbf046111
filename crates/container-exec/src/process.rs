//! Deadline-bound invocation of the runtime CLI.
//!
//! Every bounded operation funnels through [`run_bounded`]. The child's output
//! is drained on helper threads, and one deadline covers both the wait
//! (`wait-timeout`) and the drain. On unix the child gets its own process
//! group so expiry can take down anything the runtime CLI forked while
//! holding our pipes.

use crate::error::{ExecError, Result};
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// How long to wait for pipes to close once the group has been killed.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Raw output of a runtime invocation that ran to completion.
#[derive(Debug)]
pub(crate) struct Captured {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

type PipeReader = Receiver<io::Result<Vec<u8>>>;

enum Drained {
    Done(Vec<u8>),
    Failed(io::Error),
    Expired,
}

pub(crate) fn run_bounded(
    mut command: Command,
    runtime: &str,
    operation: &'static str,
    timeout: Duration,
) -> Result<Captured> {
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    // A separate group lets expiry kill everything the runtime CLI forked, but
    // it also leaves the terminal's foreground group, so Ctrl+C no longer
    // reaches it directly. `interrupt` forwards SIGINT to tracked groups.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    debug!(
        operation,
        timeout_ms = timeout.as_millis() as u64,
        "running {}",
        command_line_string(&command)
    );

    let start = Instant::now();
    let deadline = start + timeout;
    let mut child = command.spawn().map_err(|source| ExecError::Spawn {
        runtime: runtime.to_string(),
        source,
    })?;

    #[cfg(unix)]
    let _group = interrupt::track(child.id() as libc::pid_t);

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let timed_out = || {
        warn!(
            operation,
            timeout_ms = timeout.as_millis() as u64,
            "container runtime call exceeded its deadline; killing it"
        );
        ExecError::TimedOut {
            runtime: runtime.to_string(),
            operation,
            timeout,
        }
    };

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let err = timed_out();
            abandon(&mut child, stdout, stderr);
            return Err(err);
        }
        Err(source) => {
            abandon(&mut child, stdout, stderr);
            return Err(ExecError::Spawn {
                runtime: runtime.to_string(),
                source,
            });
        }
    };

    // The runtime CLI has exited, but anything it forked may still hold the
    // pipes open. The same deadline bounds the drain.
    let mut outputs = Vec::with_capacity(2);
    for reader in [stdout, stderr] {
        match collect(reader, deadline) {
            Drained::Done(bytes) => outputs.push(bytes),
            Drained::Failed(source) => {
                terminate(&mut child);
                return Err(ExecError::Spawn {
                    runtime: runtime.to_string(),
                    source,
                });
            }
            Drained::Expired => {
                let err = timed_out();
                terminate(&mut child);
                return Err(err);
            }
        }
    }
    let stderr = outputs.pop().unwrap_or_default();
    let stdout = outputs.pop().unwrap_or_default();

    debug!(
        operation,
        exit_code = status.code(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "container runtime call finished"
    );

    Ok(Captured {
        stdout: String::from_utf8_lossy(&stdout).to_string(),
        stderr: String::from_utf8_lossy(&stderr).to_string(),
        status,
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> PipeReader {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = pipe.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });
    rx
}

fn collect(reader: Option<PipeReader>, deadline: Instant) -> Drained {
    let Some(reader) = reader else {
        return Drained::Done(Vec::new());
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    match reader.recv_timeout(remaining) {
        Ok(Ok(bytes)) => Drained::Done(bytes),
        Ok(Err(err)) => Drained::Failed(err),
        Err(RecvTimeoutError::Timeout) => Drained::Expired,
        Err(RecvTimeoutError::Disconnected) => Drained::Failed(io::Error::new(
            io::ErrorKind::Other,
            "output reader thread exited without a result",
        )),
    }
}

/// Kill the group and give the readers a short grace to see EOF.
fn abandon(child: &mut Child, stdout: Option<PipeReader>, stderr: Option<PipeReader>) {
    terminate(child);
    let grace = Instant::now() + DRAIN_GRACE;
    let _ = collect(stdout, grace);
    let _ = collect(stderr, grace);
}

fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        // The child leads its own process group (see run_bounded); the group
        // outlives the leader while any member is alive.
        let pgid = child.id() as libc::pid_t;
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
mod interrupt {
    //! SIGINT forwarding for runtime calls running in their own process group.
    //!
    //! Only async-signal-safe work happens in the handler: atomic loads,
    //! `kill`, `signal` and `raise`.

    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
    use std::sync::Once;

    const SLOTS: usize = 64;

    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY: AtomicI32 = AtomicI32::new(0);

    static GROUPS: [AtomicI32; SLOTS] = [EMPTY; SLOTS];
    static PREVIOUS: AtomicUsize = AtomicUsize::new(libc::SIG_DFL);
    static INSTALL: Once = Once::new();

    extern "C" fn on_interrupt(signal: libc::c_int) {
        for slot in GROUPS.iter() {
            let pgid = slot.load(Ordering::SeqCst);
            if pgid > 0 {
                unsafe {
                    libc::kill(-pgid, libc::SIGKILL);
                }
            }
        }
        unsafe {
            libc::signal(signal, PREVIOUS.load(Ordering::SeqCst));
            libc::raise(signal);
        }
    }

    fn install() {
        INSTALL.call_once(|| unsafe {
            let handler = on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
            let previous = libc::signal(libc::SIGINT, handler);
            if previous == libc::SIG_ERR {
                return;
            }
            if previous == libc::SIG_IGN {
                // Interrupts are ignored by the host; keep it that way.
                libc::signal(libc::SIGINT, libc::SIG_IGN);
                return;
            }
            PREVIOUS.store(previous, Ordering::SeqCst);
        });
    }

    /// Registration of a live process group; cleared on drop.
    pub(crate) struct GroupGuard {
        slot: Option<usize>,
    }

    pub(crate) fn track(pgid: libc::pid_t) -> GroupGuard {
        install();
        let slot = GROUPS.iter().position(|slot| {
            slot.compare_exchange(0, pgid, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        });
        GroupGuard { slot }
    }

    impl Drop for GroupGuard {
        fn drop(&mut self) {
            if let Some(index) = self.slot {
                GROUPS[index].store(0, Ordering::SeqCst);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_tracked(pgid: libc::pid_t) -> bool {
        GROUPS.iter().any(|slot| slot.load(Ordering::SeqCst) == pgid)
    }
}

pub(crate) fn describe_status(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn shell_escape(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    let escaped = arg.replace('\'', "'\\''");
    format!("'{}'", escaped)
}

pub(crate) fn command_line_string(cmd: &Command) -> String {
    let mut s = String::new();
    s.push_str(&cmd.get_program().to_string_lossy());
    for a in cmd.get_args() {
        s.push(' ');
        let a = a.to_string_lossy();
        if a.is_empty() || a.contains(' ') || a.contains('"') || a.contains('\'') {
            s.push_str(&shell_escape(&a));
        } else {
            s.push_str(&a);
        }
    }
    s
}

use crate::process::run_bounded;
use std::env;
use std::ffi::{OsStr, OsString};
use std::process::Command;
use std::time::Duration;
use tracing::{debug, instrument};

pub const RUNTIME_ENV_VAR: &str = "RONIN_CONTAINER_RUNTIME";
pub const DEFAULT_RUNTIME: &str = "docker";

pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on a container runtime CLI (`docker`, `podman`, or anything that
/// speaks the same sub-commands).
///
/// The handle is stateless: nothing learned by one call (reachability,
/// container state) is remembered for the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRuntime {
    binary: OsString,
}

impl ContainerRuntime {
    pub fn new(binary: impl Into<OsString>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolve the runtime binary from `RONIN_CONTAINER_RUNTIME`, falling
    /// back to `docker`.
    pub fn from_env() -> Self {
        match env::var_os(RUNTIME_ENV_VAR) {
            Some(val) if !val.to_string_lossy().trim().is_empty() => Self::new(val),
            _ => Self::new(DEFAULT_RUNTIME),
        }
    }

    pub fn binary(&self) -> &OsStr {
        &self.binary
    }

    /// Name used in operator-facing messages, e.g. `docker ps -a`.
    pub fn display_name(&self) -> String {
        self.binary.to_string_lossy().to_string()
    }

    pub(crate) fn command(&self) -> Command {
        Command::new(&self.binary)
    }

    /// Whether the runtime daemon answers a server version query.
    ///
    /// Any failure (missing binary, refused connection, timeout) reads as
    /// "not available"; this never errors.
    #[instrument(skip(self), fields(runtime = %self.display_name()))]
    pub fn is_available(&self) -> bool {
        let mut command = self.command();
        command.arg("version").arg("--format={{.Server.Version}}");

        match run_bounded(command, &self.display_name(), "version", PROBE_TIMEOUT) {
            Ok(captured) if captured.success() => {
                debug!(version = %captured.stdout.trim(), "container runtime reachable");
                true
            }
            Ok(captured) => {
                debug!(stderr = %captured.stderr.trim(), "container runtime did not answer");
                false
            }
            Err(err) => {
                debug!(error = %err, "container runtime probe failed");
                false
            }
        }
    }
}

impl Default for ContainerRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

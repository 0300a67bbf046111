use crate::error::{ExecError, Result};
use crate::process::run_bounded;
use crate::runtime::ContainerRuntime;
use crate::verify::check_container_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::process::Command;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(30);

/// Shell used inside the container to interpret commands.
pub(crate) const CONTAINER_SHELL: &str = "sh";

/// Outcome of a command that ran inside a container.
///
/// A non-zero `exit_code` is data about the command, not a failure of the
/// execution itself; those are reported as [`ExecError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// One captured execution: what to run, where, for how long, with which
/// extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub container: String,
    pub command: String,
    pub timeout: Duration,
    pub env: BTreeMap<String, String>,
}

impl ExecRequest {
    pub fn new(container: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            command: command.into(),
            timeout: DEFAULT_EXEC_TIMEOUT,
            env: BTreeMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_env<K, V, I>(mut self, env: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.env
            .extend(env.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Reject requests that must never reach the runtime.
    pub fn validate(&self) -> Result<()> {
        check_target(&self.container, &self.command)?;
        for name in self.env.keys() {
            if name.is_empty() || name.contains('=') {
                return Err(ExecError::InvalidEnvName { name: name.clone() });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_target(container: &str, command: &str) -> Result<()> {
    check_container_name(container)?;
    if command.is_empty() {
        return Err(ExecError::Precondition { field: "command" });
    }
    Ok(())
}

impl ContainerRuntime {
    /// Run `command` with the default 30s budget and return its stdout.
    ///
    /// The exit code is not inspected; use [`ContainerRuntime::execute_detailed`]
    /// when it matters.
    pub fn execute(&self, container: &str, command: &str) -> Result<String> {
        self.run(&ExecRequest::new(container, command))
            .map(|result| result.stdout)
    }

    pub fn execute_detailed(
        &self,
        container: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        self.run(&ExecRequest::new(container, command).with_timeout(timeout))
    }

    /// Like [`ContainerRuntime::execute_detailed`], passing `env` to the
    /// process through the runtime (`-e NAME=VALUE`), not through the local
    /// environment.
    pub fn execute_with_env(
        &self,
        container: &str,
        command: &str,
        env: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        self.run(
            &ExecRequest::new(container, command)
                .with_timeout(timeout)
                .with_env(env.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        )
    }

    /// Verify the target container, then run the request's command in it.
    #[instrument(
        skip(self, request),
        fields(
            runtime = %self.display_name(),
            container = %request.container,
            timeout_ms = request.timeout.as_millis() as u64,
        )
    )]
    pub fn run(&self, request: &ExecRequest) -> Result<ExecutionResult> {
        request.validate()?;
        self.verify(&request.container)?;

        let mut command = self.command();
        configure_exec(&mut command, request);

        let captured = run_bounded(
            command,
            &self.display_name(),
            "exec",
            request.timeout,
        )?;

        let exit_code = captured.status.code().ok_or_else(|| ExecError::Terminated {
            runtime: self.display_name(),
            operation: "exec",
        })?;

        debug!(exit_code, "command finished");

        Ok(ExecutionResult {
            stdout: captured.stdout.trim().to_string(),
            stderr: captured.stderr.trim().to_string(),
            exit_code,
        })
    }
}

fn configure_exec(command: &mut Command, request: &ExecRequest) {
    command.arg("exec");
    for (key, value) in &request.env {
        command.arg("-e").arg(format!("{}={}", key, value));
    }
    command
        .arg(&request.container)
        .arg(CONTAINER_SHELL)
        .arg("-c")
        .arg(&request.command);
}

use std::time::Duration;
use thiserror::Error;

/// Coarse classification of an [`ExecError`].
///
/// Callers that only need to decide how to react (retry, alert, fix the
/// menu) match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was rejected before any subprocess was spawned.
    Precondition,
    /// The container runtime itself could not be reached.
    RuntimeUnavailable,
    /// The runtime answered but does not know the container.
    ContainerNotFound,
    /// The container exists but is not in the running state.
    ContainerNotRunning,
    /// Verification passed but the runtime call itself did not complete.
    Spawn,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{field} required")]
    Precondition { field: &'static str },

    #[error("invalid environment variable name '{name}'")]
    InvalidEnvName { name: String },

    #[error("invalid container name '{name}': must not start with '-'")]
    InvalidContainerName { name: String },

    #[error(
        "Container runtime '{runtime}' is not running or not accessible. Please start it and try again"
    )]
    RuntimeUnavailable { runtime: String },

    #[error(
        "Container '{container}' not found. Available containers can be listed with '{runtime} ps -a'"
    )]
    ContainerNotFound {
        container: String,
        runtime: String,
        detail: Option<String>,
    },

    #[error(
        "Container '{container}' exists but is not running (state: {state}). Start it with '{runtime} start {container}'"
    )]
    ContainerNotRunning {
        container: String,
        state: String,
        runtime: String,
    },

    #[error("failed to execute command: could not run container runtime '{runtime}': {source}")]
    Spawn {
        runtime: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute command: '{runtime} {operation}' timed out after {timeout:?}")]
    TimedOut {
        runtime: String,
        operation: &'static str,
        timeout: Duration,
    },

    #[error("failed to execute command: '{runtime} {operation}' was terminated before exiting")]
    Terminated {
        runtime: String,
        operation: &'static str,
    },

    #[error("'{runtime} {operation}' failed ({status}): {stderr}")]
    RuntimeCommand {
        runtime: String,
        operation: &'static str,
        status: String,
        stderr: String,
    },
}

impl ExecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecError::Precondition { .. }
            | ExecError::InvalidEnvName { .. }
            | ExecError::InvalidContainerName { .. } => ErrorKind::Precondition,
            ExecError::RuntimeUnavailable { .. } => ErrorKind::RuntimeUnavailable,
            ExecError::ContainerNotFound { .. } => ErrorKind::ContainerNotFound,
            ExecError::ContainerNotRunning { .. } => ErrorKind::ContainerNotRunning,
            ExecError::Spawn { .. }
            | ExecError::TimedOut { .. }
            | ExecError::Terminated { .. }
            | ExecError::RuntimeCommand { .. } => ErrorKind::Spawn,
        }
    }

    /// Stable machine-readable code, suitable for JSON output and alerting.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Precondition => "CONTAINER_EXEC_PRECONDITION",
            ErrorKind::RuntimeUnavailable => "CONTAINER_EXEC_RUNTIME_UNAVAILABLE",
            ErrorKind::ContainerNotFound => "CONTAINER_EXEC_CONTAINER_NOT_FOUND",
            ErrorKind::ContainerNotRunning => "CONTAINER_EXEC_CONTAINER_NOT_RUNNING",
            ErrorKind::Spawn => "CONTAINER_EXEC_SPAWN_ERROR",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecError::TimedOut { .. })
    }

    /// Verification failures carry a remediation hint for the operator.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RuntimeUnavailable
                | ErrorKind::ContainerNotFound
                | ErrorKind::ContainerNotRunning
        )
    }
}

pub type Result<T, E = ExecError> = std::result::Result<T, E>;

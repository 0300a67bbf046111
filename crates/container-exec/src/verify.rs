use crate::error::{ExecError, Result};
use crate::process::{describe_status, run_bounded};
use crate::runtime::ContainerRuntime;
use std::time::Duration;
use tracing::{debug, instrument};

pub(crate) const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Names the runtime CLI would parse as a flag never reach it.
pub(crate) fn check_container_name(container: &str) -> Result<()> {
    if container.is_empty() {
        return Err(ExecError::Precondition {
            field: "container name",
        });
    }
    if container.starts_with('-') {
        return Err(ExecError::InvalidContainerName {
            name: container.to_string(),
        });
    }
    Ok(())
}

impl ContainerRuntime {
    /// Confirm `container` exists and is running.
    ///
    /// A failed inspect is disambiguated by probing the runtime: an
    /// unreachable runtime yields [`ExecError::RuntimeUnavailable`], anything
    /// else [`ExecError::ContainerNotFound`]. A reachable container whose
    /// running flag is not `true` yields [`ExecError::ContainerNotRunning`].
    #[instrument(skip(self), fields(runtime = %self.display_name()))]
    pub fn verify(&self, container: &str) -> Result<()> {
        check_container_name(container)?;

        let runtime = self.display_name();
        let mut command = self.command();
        command
            .arg("inspect")
            .arg(container)
            .arg("--format={{.State.Running}}");

        let inspect = run_bounded(command, &runtime, "inspect", VERIFY_TIMEOUT)
            .and_then(|captured| {
                if captured.success() {
                    Ok(captured.stdout)
                } else {
                    Err(ExecError::RuntimeCommand {
                        runtime: runtime.clone(),
                        operation: "inspect",
                        status: describe_status(&captured.status),
                        stderr: captured.stderr.trim().to_string(),
                    })
                }
            });

        let state = match inspect {
            Ok(stdout) => stdout.trim().to_string(),
            Err(err) => {
                debug!(error = %err, "inspect failed; probing runtime");
                if !self.is_available() {
                    return Err(ExecError::RuntimeUnavailable { runtime });
                }
                let detail = match err {
                    ExecError::RuntimeCommand { stderr, .. } if !stderr.is_empty() => Some(stderr),
                    ExecError::RuntimeCommand { .. } => None,
                    other => Some(other.to_string()),
                };
                return Err(ExecError::ContainerNotFound {
                    container: container.to_string(),
                    runtime,
                    detail,
                });
            }
        };

        if state != "true" {
            return Err(ExecError::ContainerNotRunning {
                container: container.to_string(),
                state: if state.is_empty() {
                    "unknown".to_string()
                } else {
                    state
                },
                runtime,
            });
        }

        debug!("container verified running");
        Ok(())
    }
}

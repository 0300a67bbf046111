use crate::error::{ExecError, Result};
use crate::exec::{check_target, CONTAINER_SHELL};
use crate::runtime::ContainerRuntime;
use std::process::Stdio;
use tracing::{debug, instrument};

impl ContainerRuntime {
    /// Run `command` with the caller's terminal attached (`exec -it`).
    ///
    /// Nothing is captured and no deadline applies: the call blocks until the
    /// remote process exits or the terminal goes away. Returns the remote
    /// exit code.
    #[instrument(skip(self, command), fields(runtime = %self.display_name()))]
    pub fn run_interactive(&self, container: &str, command: &str) -> Result<i32> {
        check_target(container, command)?;
        self.verify(container)?;

        let runtime = self.display_name();
        let mut process = self.command();
        process
            .arg("exec")
            .arg("-it")
            .arg(container)
            .arg(CONTAINER_SHELL)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!("attaching terminal to container");
        let status = process.status().map_err(|source| ExecError::Spawn {
            runtime: runtime.clone(),
            source,
        })?;

        status.code().ok_or(ExecError::Terminated {
            runtime,
            operation: "exec",
        })
    }
}

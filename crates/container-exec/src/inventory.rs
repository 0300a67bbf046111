use crate::error::{ExecError, Result};
use crate::process::{describe_status, run_bounded};
use crate::runtime::ContainerRuntime;
use std::time::Duration;
use tracing::instrument;

pub(crate) const LIST_TIMEOUT: Duration = Duration::from_secs(10);

impl ContainerRuntime {
    /// Names of all running containers, in the order the runtime lists them.
    #[instrument(skip(self), fields(runtime = %self.display_name()))]
    pub fn list_running(&self) -> Result<Vec<String>> {
        let runtime = self.display_name();
        let mut command = self.command();
        command.arg("ps").arg("--format={{.Names}}");

        let captured = run_bounded(command, &runtime, "ps", LIST_TIMEOUT)?;
        if !captured.success() {
            return Err(ExecError::RuntimeCommand {
                runtime,
                operation: "ps",
                status: describe_status(&captured.status),
                stderr: captured.stderr.trim().to_string(),
            });
        }

        Ok(parse_names(&captured.stdout))
    }
}

fn parse_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

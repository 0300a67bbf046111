use crate::error::{ExecError, Result};
use crate::process::{describe_status, run_bounded};
use crate::runtime::ContainerRuntime;
use crate::verify::check_container_name;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

pub(crate) const TRANSFER_TIMEOUT: Duration = Duration::from_secs(30);

impl ContainerRuntime {
    /// Copy a local file or directory to `remote` inside `container`.
    #[instrument(skip(self, local), fields(runtime = %self.display_name(), local = %local.display()))]
    pub fn copy_to(&self, container: &str, local: &Path, remote: &str) -> Result<()> {
        check_paths(container, local, remote)?;
        self.verify(container)?;
        self.copy(local.as_os_str().to_owned(), container_path(container, remote))
    }

    /// Copy `remote` from inside `container` to a local path.
    #[instrument(skip(self, local), fields(runtime = %self.display_name(), local = %local.display()))]
    pub fn copy_from(&self, container: &str, remote: &str, local: &Path) -> Result<()> {
        check_paths(container, local, remote)?;
        self.verify(container)?;
        self.copy(container_path(container, remote), local.as_os_str().to_owned())
    }

    fn copy(&self, source: OsString, dest: OsString) -> Result<()> {
        let runtime = self.display_name();
        let mut command = self.command();
        command.arg("cp").arg(source).arg(dest);

        let captured = run_bounded(command, &runtime, "cp", TRANSFER_TIMEOUT)?;
        if !captured.success() {
            return Err(ExecError::RuntimeCommand {
                runtime,
                operation: "cp",
                status: describe_status(&captured.status),
                stderr: captured.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

fn check_paths(container: &str, local: &Path, remote: &str) -> Result<()> {
    check_container_name(container)?;
    if local.as_os_str().is_empty() {
        return Err(ExecError::Precondition {
            field: "local path",
        });
    }
    if remote.is_empty() {
        return Err(ExecError::Precondition {
            field: "container path",
        });
    }
    Ok(())
}

fn container_path(container: &str, remote: &str) -> OsString {
    OsString::from(format!("{}:{}", container, remote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_side_is_prefixed_with_identifier() {
        assert_eq!(container_path("db1", "/tmp/dump.sql"), "db1:/tmp/dump.sql");
    }

    #[test]
    fn empty_paths_are_preconditions() {
        let err = check_paths("db1", Path::new(""), "/tmp").unwrap_err();
        assert_eq!(err.to_string(), "local path required");

        let err = check_paths("db1", Path::new("dump.sql"), "").unwrap_err();
        assert_eq!(err.to_string(), "container path required");

        let err = check_paths("", Path::new("dump.sql"), "/tmp").unwrap_err();
        assert_eq!(err.to_string(), "container name required");
    }
}

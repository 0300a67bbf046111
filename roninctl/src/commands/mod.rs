pub mod cp;
pub mod doctor;
pub mod exec;
pub mod init;
pub mod menu;
pub mod ps;
pub mod run;
pub mod tasks;
pub mod validate;

use anyhow::{Context, Result};
use container_exec::{ContainerRuntime, ExecRequest, ExecutionResult};
use menu_config::{MenuConfig, Task};
use std::time::Duration;
use tracing::info;

use crate::GlobalArgs;

pub(crate) fn load_menu(global: &GlobalArgs) -> Result<MenuConfig> {
    Ok(MenuConfig::load(&global.menu)?)
}

/// What running a menu task produced.
#[derive(Debug)]
pub(crate) enum TaskOutcome {
    Captured(ExecutionResult),
    Interactive { exit_code: i32 },
}

impl TaskOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskOutcome::Captured(result) => result.exit_code,
            TaskOutcome::Interactive { exit_code } => *exit_code,
        }
    }
}

/// Hand a menu task to the core, picking the mode the task asks for.
pub(crate) fn run_task(
    runtime: &ContainerRuntime,
    task: &Task,
    default_timeout: Duration,
) -> Result<TaskOutcome> {
    info!(label = %task.label, container = %task.container, "running task");

    if task.interactive {
        let exit_code = runtime.run_interactive(&task.container, &task.command)?;
        return Ok(TaskOutcome::Interactive { exit_code });
    }

    let timeout = task
        .timeout()
        .with_context(|| format!("Task '{}' has an invalid timeout", task.label))?
        .unwrap_or(default_timeout);

    let request = ExecRequest::new(&task.container, &task.command)
        .with_timeout(timeout)
        .with_env(task.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    Ok(TaskOutcome::Captured(runtime.run(&request)?))
}

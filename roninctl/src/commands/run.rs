use anyhow::{anyhow, Result};
use clap::Args;

use super::{load_menu, run_task, TaskOutcome};
use crate::GlobalArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Label of the menu task to run
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Output the execution result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs, global: &GlobalArgs) -> Result<i32> {
    let config = load_menu(global)?;
    let task = config.find_task(&args.label).ok_or_else(|| {
        let labels: Vec<_> = config.tasks().map(|t| format!("'{}'", t.label)).collect();
        anyhow!(
            "No task labelled '{}' in {}. Available: {}",
            args.label,
            global.menu.display(),
            labels.join(", ")
        )
    })?;

    let outcome = run_task(&global.container_runtime(), task, global.timeout)?;
    if let TaskOutcome::Captured(result) = &outcome {
        if args.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            super::exec::print_result(result);
        }
    }
    Ok(outcome.exit_code())
}

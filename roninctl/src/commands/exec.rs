use anyhow::Result;
use clap::Args;
use container_exec::{ExecRequest, ExecutionResult};

use crate::GlobalArgs;

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Target container name or id
    #[arg(value_name = "CONTAINER")]
    pub container: String,

    /// Shell command, run with `sh -c` inside the container
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Environment variable for the command (repeatable)
    #[arg(short, long = "env", value_name = "NAME=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Attach the terminal instead of capturing output (no timeout)
    #[arg(short, long, conflicts_with = "json")]
    pub interactive: bool,

    /// Output the execution result as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

pub fn run(args: ExecArgs, global: &GlobalArgs) -> Result<i32> {
    let runtime = global.container_runtime();

    if args.interactive {
        return Ok(runtime.run_interactive(&args.container, &args.command)?);
    }

    let request = ExecRequest::new(args.container, args.command)
        .with_timeout(global.timeout)
        .with_env(args.env);
    let result = runtime.run(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(result.exit_code)
}

pub(crate) fn print_result(result: &ExecutionResult) {
    if !result.stdout.is_empty() {
        println!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprintln!("{}", result.stderr);
    }
}

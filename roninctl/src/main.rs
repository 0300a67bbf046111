use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use container_exec::{ContainerRuntime, ExecError, DEFAULT_RUNTIME};
use menu_config::DEFAULT_MENU_FILE;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "roninctl",
    version,
    about = "Pick a task from a menu and run it inside a running container"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Menu definition file
    #[arg(long, global = true, env = "RONIN_MENU", default_value = DEFAULT_MENU_FILE)]
    pub menu: PathBuf,

    /// Container runtime CLI to drive (docker, podman, ...)
    #[arg(
        long,
        global = true,
        env = "RONIN_CONTAINER_RUNTIME",
        default_value = DEFAULT_RUNTIME
    )]
    pub runtime: String,

    /// Time budget for captured executions without their own timeout
    #[arg(
        long,
        global = true,
        env = "RONIN_EXEC_TIMEOUT",
        default_value = "30s",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,
}

impl GlobalArgs {
    pub fn container_runtime(&self) -> ContainerRuntime {
        ContainerRuntime::new(&self.runtime)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu and run tasks interactively
    Menu,
    /// Run one menu task by its label
    Run(commands::run::RunArgs),
    /// Run an ad-hoc command inside a container
    Exec(commands::exec::ExecArgs),
    /// List running containers
    Ps(commands::ps::PsArgs),
    /// Copy files between the host and a container
    Cp(commands::cp::CpArgs),
    /// Check the runtime and every container the menu references
    Doctor,
    /// Write an example menu file
    Init(commands::init::InitArgs),
    /// Validate the menu file
    Validate,
    /// List the tasks defined in the menu
    Tasks(commands::tasks::TasksArgs),
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(cli: Cli) -> Result<i32> {
    let global = cli.global;
    match cli.cmd.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&global),
        Commands::Run(args) => commands::run::run(args, &global),
        Commands::Exec(args) => commands::exec::run(args, &global),
        Commands::Ps(args) => commands::ps::run(args, &global),
        Commands::Cp(args) => commands::cp::run(args, &global),
        Commands::Doctor => commands::doctor::run(&global),
        Commands::Init(args) => commands::init::run(args, &global),
        Commands::Validate => commands::validate::run(&global),
        Commands::Tasks(args) => commands::tasks::run(args, &global),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            // Core errors already carry their cause and remediation hint.
            if let Some(exec) = err.downcast_ref::<ExecError>() {
                eprintln!("Error: {}", exec);
            } else {
                eprintln!("Error: {:#}", err);
            }
            std::process::exit(1);
        }
    }
}

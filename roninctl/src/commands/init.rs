use anyhow::Result;
use clap::Args;
use menu_config::write_example_menu;
use std::path::PathBuf;

use crate::GlobalArgs;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the example (defaults to --menu)
    #[arg(long, value_name = "FILE")]
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs, global: &GlobalArgs) -> Result<i32> {
    let path = args.path.unwrap_or_else(|| global.menu.clone());
    write_example_menu(&path)?;
    println!("✓ Example menu written to {}", path.display());
    println!("Edit the container names and commands, then run `roninctl`.");
    Ok(0)
}

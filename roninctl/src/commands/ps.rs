use anyhow::Result;
use clap::Args;
use tabled::{settings::style::Style, Table, Tabled};

use crate::GlobalArgs;

#[derive(Args, Debug, Default)]
pub struct PsArgs {
    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ContainerRow {
    #[tabled(rename = "NAME")]
    name: String,
}

pub fn run(args: PsArgs, global: &GlobalArgs) -> Result<i32> {
    let names = global.container_runtime().list_running()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(0);
    }

    if names.is_empty() {
        println!("No running containers.");
        return Ok(0);
    }

    let mut table = Table::new(names.into_iter().map(|name| ContainerRow { name }));
    table.with(Style::rounded());
    println!("{}", table);
    Ok(0)
}

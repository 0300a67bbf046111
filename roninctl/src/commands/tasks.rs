use anyhow::Result;
use clap::Args;
use tabled::{settings::style::Style, Table, Tabled};

use super::load_menu;
use crate::GlobalArgs;

#[derive(Args, Debug, Default)]
pub struct TasksArgs {
    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "LABEL")]
    label: String,
    #[tabled(rename = "CONTAINER")]
    container: String,
    #[tabled(rename = "MODE")]
    mode: &'static str,
}

pub fn run(args: TasksArgs, global: &GlobalArgs) -> Result<i32> {
    let config = load_menu(global)?;

    if args.json {
        let tasks: Vec<_> = config.tasks().collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(0);
    }

    let rows: Vec<TaskRow> = config
        .menu
        .iter()
        .flat_map(|category| category.items.iter().map(move |task| (category, task)))
        .enumerate()
        .map(|(i, (category, task))| TaskRow {
            number: i + 1,
            category: category.title.clone(),
            label: task.label.clone(),
            container: task.container.clone(),
            mode: if task.interactive {
                "interactive"
            } else {
                "captured"
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(0)
}
